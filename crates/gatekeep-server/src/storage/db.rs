//! `SQLite` database for the Gatekeep server.

gatekeep_core::define_database!(Database, "Gatekeep database migrations complete");
