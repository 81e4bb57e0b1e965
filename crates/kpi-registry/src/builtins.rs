//! KPI definitions shipped with every registry.

use chrono::{DateTime, Utc};
use kpi_core::{Category, KpiDefinition};

/// Id of the operating cash flow to total debt ratio.
pub const OPERATING_CF_DEBT: &str = "operating_cf_debt";

/// Id of the revenue per employee ratio.
pub const REVENUE_PER_EMPLOYEE: &str = "revenue_per_employee";

/// Built-in definitions in their fixed declaration order.
pub fn definitions(created_at: DateTime<Utc>) -> Vec<KpiDefinition> {
    vec![
        KpiDefinition::built_in(
            OPERATING_CF_DEBT,
            "Operating CF / Total Debt",
            "Operating_Cash_Flow / Total_Debt",
            Category::Liquidity,
            "Measures ability to pay off debt using operating cash flow",
            created_at,
        ),
        KpiDefinition::built_in(
            REVENUE_PER_EMPLOYEE,
            "Revenue per Employee",
            "Revenue / Employee_Count",
            Category::Efficiency,
            "Revenue productivity per employee",
            created_at,
        ),
    ]
}
