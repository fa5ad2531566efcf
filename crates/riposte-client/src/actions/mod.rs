//! Asynchronous actions, grouped by feature the way screens consume
//! them.  Each file extends [`AppContext`](crate::AppContext) with the
//! action methods for one area.

mod auth;
mod chat;
mod premium;
