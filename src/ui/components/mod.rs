mod credit_card;
mod header;
mod help_popup;
mod message_screen;
mod meter;
mod model_list;
mod plan_card;
mod status_bar;

pub use credit_card::CreditCard;
pub use header::{Header, TITLE};
pub use help_popup::HelpPopup;
pub use message_screen::{ErrorScreen, LoadingScreen};
pub use model_list::ModelList;
pub use plan_card::PlanCard;
pub use status_bar::StatusBar;
