//! Integration tests for the HTTP layer.
//!
//! `auth_test` and `validation_test` run without a live database: the
//! pool is created lazily and every request is answered before a
//! connection would be needed. `workflow_test` drives the full
//! donation → claim → delivery state machine and needs a Postgres named
//! by `DATABASE_URL`; without it those tests skip.

mod auth_test;
mod helpers;
mod validation_test;
mod workflow_test;
