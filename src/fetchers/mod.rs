mod cache;
mod request;

pub use cache::ResponseCache;
pub use request::RequestFetcher;
