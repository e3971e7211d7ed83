//! Descriptors for the FreshBooks resources this SDK exposes.
//!
//! Accounting resources live under `/accounting/account/{account_id}`;
//! project-like resources under `/{topic}/business/{business_id}`.
//!
//! | Constant | Single path | List path | Key |
//! |---|---|---|---|
//! | [`CLIENTS`] | `users/clients` | `users/clients` | `client` |
//! | [`INVOICES`] | `invoices/invoices` | `invoices/invoices` | `invoice` |
//! | [`EXPENSES`] | `expenses/expenses` | `expenses/expenses` | `expense` |
//! | [`ITEMS`] | `items/items` | `items/items` | `item` |
//! | [`PAYMENTS`] | `payments/payments` | `payments/payments` | `payment` |
//! | [`TAXES`] | `taxes/taxes` | `taxes/taxes` | `tax` |
//! | [`TASKS`] | `projects/tasks` | `projects/tasks` | `task` |
//! | [`OTHER_INCOMES`] | `other_incomes/other_incomes` | `other_incomes/other_incomes` | `other_income` |
//! | [`PROJECTS`] | `project` | `projects` | `project` |
//! | [`SERVICES`] | `service` | `services` | `service` |
//! | [`TIME_ENTRIES`] | `time_entries` | `time_entries` | `time_entry` |
//! | [`SERVICE_RATES`] | `service/{service_id}/rate` | `service_rates` | `service_rate` |

use std::fmt;

use crate::clients::{HttpMethod, Transport};
use crate::query::{build_query_string, FilterQueryBuilder};
use crate::rest::endpoint::{exchange, take_object, DeleteStyle, PathTarget, ResourceDescriptor};
use crate::rest::sub_resource::SubResourceDescriptor;
use crate::rest::{Dialect, FreshBooksError, Payload, Topic, UrlTemplate};

/// Clients of the account.
pub const CLIENTS: ResourceDescriptor =
    ResourceDescriptor::accounting("clients", "users/clients", "client", "clients");

/// Invoices.
pub const INVOICES: ResourceDescriptor =
    ResourceDescriptor::accounting("invoices", "invoices/invoices", "invoice", "invoices");

/// Expenses.
pub const EXPENSES: ResourceDescriptor =
    ResourceDescriptor::accounting("expenses", "expenses/expenses", "expense", "expenses");

/// Billable items.
pub const ITEMS: ResourceDescriptor =
    ResourceDescriptor::accounting("items", "items/items", "item", "items");

/// Invoice payments.
pub const PAYMENTS: ResourceDescriptor =
    ResourceDescriptor::accounting("payments", "payments/payments", "payment", "payments");

/// Taxes.
pub const TAXES: ResourceDescriptor =
    ResourceDescriptor::accounting("taxes", "taxes/taxes", "tax", "taxes");

/// Billable tasks (an accounting resource despite the path).
pub const TASKS: ResourceDescriptor =
    ResourceDescriptor::accounting("tasks", "projects/tasks", "task", "tasks");

/// Other income entries. Unlike other accounting resources these are
/// removed with HTTP `DELETE`.
pub const OTHER_INCOMES: ResourceDescriptor = ResourceDescriptor::accounting(
    "other_incomes",
    "other_incomes/other_incomes",
    "other_income",
    "other_income",
)
.with_delete_style(DeleteStyle::HttpDelete);

/// Projects. Created on the single-resource path.
pub const PROJECTS: ResourceDescriptor = ResourceDescriptor::project(
    "projects",
    UrlTemplate::Project(Topic::Projects),
    "project",
    "projects",
    "project",
    "projects",
    PathTarget::Single,
);

/// Services. Created on the single-resource path.
pub const SERVICES: ResourceDescriptor = ResourceDescriptor::project(
    "services",
    UrlTemplate::Project(Topic::Comments),
    "service",
    "services",
    "service",
    "services",
    PathTarget::Single,
);

/// Time entries. Created on the collection path.
pub const TIME_ENTRIES: ResourceDescriptor = ResourceDescriptor::project(
    "time_entries",
    UrlTemplate::Project(Topic::TimeTracking),
    "time_entries",
    "time_entries",
    "time_entry",
    "time_entries",
    PathTarget::Collection,
);

/// The billable rate of a service. Listing is not paginated.
pub const SERVICE_RATES: SubResourceDescriptor = SubResourceDescriptor {
    name: "service_rates",
    template: UrlTemplate::Project(Topic::Comments),
    parent_path: "service",
    single_path: "rate",
    list_path: "service_rates",
    single_key: "service_rate",
    list_key: "service_rates",
};

const REPORTS_PATH: &str = "reports/accounting";

/// Accounting reports.
///
/// Reports use the accounting envelope, but their parameters are plain
/// query parameters (`&start_date=...`), never `search[...]`.
#[derive(Debug)]
pub struct AccountingReports<'a, T: Transport> {
    transport: &'a T,
}

impl<'a, T: Transport> AccountingReports<'a, T> {
    /// Creates a reports endpoint.
    #[must_use]
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Builds `/accounting/account/{account_id}/reports/accounting/{report}[?filters]`.
    #[must_use]
    pub fn build_url(
        &self,
        account_id: impl fmt::Display,
        report: &str,
        filters: Option<&FilterQueryBuilder>,
    ) -> String {
        let base = UrlTemplate::Accounting.base(&account_id.to_string(), REPORTS_PATH);
        let query = filters.map_or_else(String::new, |filters| {
            build_query_string(&[filters], Dialect::ProjectLike)
        });
        format!("{base}/{report}{query}")
    }

    /// Fetches the profit and loss report.
    ///
    /// # Errors
    ///
    /// Returns [`FreshBooksError`] if the request fails or the response does
    /// not contain the report.
    pub async fn profit_and_loss(
        &self,
        account_id: impl fmt::Display,
        filters: Option<&FilterQueryBuilder>,
    ) -> Result<Payload, FreshBooksError> {
        let url = self.build_url(account_id, "profitloss", filters);
        let (response, payload) = exchange(
            self.transport,
            Dialect::AccountingLike,
            HttpMethod::Get,
            &url,
            None,
        )
        .await?;
        take_object(&response, payload, "profitloss")
    }
}
