// Page objects
//
// One module per target screen. Page objects own their locators and expose
// user intents; selectors never leave these modules.

pub mod load_delay;
pub mod playground;
pub mod progress_bar;
pub mod sample_app;
pub mod team_site;

pub use load_delay::LoadDelay;
pub use playground::{App, AppPage, Playground};
pub use progress_bar::{ProgressBar, ProgressReport};
pub use sample_app::{LoginState, SampleApp};
pub use team_site::{Language, TeamSite, tally_nationalities};
