//! Money Kernel (Section 4.A).
//!
//! Pure, side-effect-free money arithmetic. Every function here takes its
//! inputs explicitly and returns `Decimal` — no module in this tree reaches
//! into global state to price anything.

pub mod condition;
pub mod customs;
pub mod fees;
pub mod forex;
pub mod profit;

pub use condition::{map_condition, CardmarketGrade, ConditionMapping, TcgPlayerGrade};
pub use customs::calculate_customs;
pub use fees::{calculate_platform_fees, Platform};
pub use forex::{convert_eur_to_usd, convert_usd_to_eur, ForexCache};
pub use profit::{calculate_net_profit, NetProfitBreakdown};
