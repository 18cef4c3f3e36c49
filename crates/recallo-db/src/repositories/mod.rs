// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut Transaction` (atomic operations).

pub mod card;
pub mod daily_goal;
pub mod item;
pub mod schedule;
pub mod user;
