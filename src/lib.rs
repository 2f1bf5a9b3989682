pub mod browser;
pub mod config;
pub mod element;
pub mod error;
pub mod extract;
pub mod page;
pub mod report;
pub mod request;
pub mod rules;
pub mod run;
pub mod session;
pub mod stealth;
pub mod validate;

pub use browser::FlightBrowser;
pub use config::{BrowserConfig, RunSeparator, ScrapeConfig};
pub use error::{Error, Result};
pub use extract::FlightRecord;
pub use report::{Reporter, ResultStore};
pub use request::{InputError, SearchRequest};
pub use validate::{validate_city_code, validate_date};
