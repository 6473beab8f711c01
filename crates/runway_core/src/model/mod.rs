mod envelope;
mod events;
mod ids;
mod results;
mod schedule;

pub use envelope::{AccountType, DEBT_CATEGORY, EnvelopeDef, GrowthModel};
pub use events::{
    AccountSeed, AdditionalInflowParams, BudgetCategory, BudgetModifier, BudgetParams, CarParams,
    DeclareAccountsParams, Event, EventKind, ExtraPaymentParams, FlowModifier, HoursChangeParams,
    HouseParams, IncrementAmountParams, InflowParams, LoanModifier, ManualCorrectionParams,
    MonthlyBudget, NewAppraisalParams, OutflowParams, PaymentScheduleParams, PayrollModifier,
    RaiseParams, RateChangeParams, RefinanceParams, ReoccurringRaiseParams, SalariedJobParams,
    SellHouseParams, TransferParams, UpdateAmountParams, UpdateBudgetParams, WageJobParams,
    WithholdingKeys, WithholdingRates,
};
pub use ids::EventId;
pub use results::{AccountWarning, Datum, ParameterUpdate, Projection};
pub use schedule::{NO_END, Recurrence};
