//! JSON HTTP API over the task service
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/tasks` | 200 |
//! | POST | `/api/tasks` | 201 + `Location` |
//! | GET | `/api/tasks/statistics` | 200 |
//! | GET | `/api/tasks/:id` | 200 |
//! | PUT | `/api/tasks/:id` | 204 |
//! | DELETE | `/api/tasks/:id` | 204 |
//! | GET | `/health` | 200, or 503 when unhealthy |

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use routes::{create_router, AppState};
