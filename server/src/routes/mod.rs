pub mod dates;
pub mod math;
pub mod trivia;
pub mod years;

use serde::Serialize;

/// Every successful fact lookup nests its payload under a "fact" key.
#[derive(Serialize)]
pub struct FactResponse<T> {
    pub fact: T,
}
