mod jwt;
mod server;

pub use jwt::{now_secs, TestJwt, TokenBuilder, TEST_SECRET};
pub use server::{refused_url, RecordedRequest, Recorder, StubServer};
