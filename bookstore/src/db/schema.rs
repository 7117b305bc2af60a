// SPDX-License-Identifier: AGPL-3.0-or-later

//! Table definitions per supported database.
//!
//! Timestamps are stored as text in both databases so the same queries decode them through the
//! `Any` driver. Identifiers use auto-incrementing keys which are never handed out twice.

pub const SQLITE: &[&str] = &[
    "
    CREATE TABLE IF NOT EXISTS countries (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        updated_at      TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        iso3            TEXT NOT NULL,
        country         TEXT NOT NULL,
        nice_country    TEXT NOT NULL,
        currency        TEXT NOT NULL
    )
    ",
    "
    CREATE TABLE IF NOT EXISTS authors (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        updated_at      TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        country_id      INTEGER NOT NULL REFERENCES countries(id),
        author          TEXT NOT NULL,
        city            TEXT NOT NULL
    )
    ",
];

pub const POSTGRES: &[&str] = &[
    "
    CREATE TABLE IF NOT EXISTS countries (
        id              BIGSERIAL PRIMARY KEY,
        updated_at      TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        iso3            TEXT NOT NULL,
        country         TEXT NOT NULL,
        nice_country    TEXT NOT NULL,
        currency        TEXT NOT NULL
    )
    ",
    "
    CREATE TABLE IF NOT EXISTS authors (
        id              BIGSERIAL PRIMARY KEY,
        updated_at      TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        country_id      BIGINT NOT NULL REFERENCES countries(id),
        author          TEXT NOT NULL,
        city            TEXT NOT NULL
    )
    ",
];
