mod clock;
mod config;
mod http;
mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use http::{ApiClient, CredentialHeader};
pub use storage::{FileStore, KeyValueStore, MemoryStore, TOKEN_KEY};
