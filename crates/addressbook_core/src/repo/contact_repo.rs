//! Contact snapshot repository and SQLite implementation.
//!
//! # Responsibility
//! - Persist the full address book as one snapshot.
//! - Load a snapshot back in canonical store order.
//!
//! # Invariants
//! - `save_address_book` replaces the whole snapshot in one transaction.
//! - Row `position` mirrors the store position of each contact.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::contact::{Address, Contact, Email, Name, Phone};
use crate::model::tag::Tag;
use crate::store::address_book::AddressBook;
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Snapshot persistence contract for the address book.
pub trait ContactRepository {
    fn load_address_book(&self) -> RepoResult<AddressBook>;
    fn save_address_book(&mut self, book: &AddressBook) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository owning its connection.
pub struct SqliteContactRepository {
    conn: Connection,
}

impl SqliteContactRepository {
    /// Wraps a migrated connection after checking required tables.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        for table in ["contacts", "contact_tags"] {
            if !table_exists(&conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ContactRepository for SqliteContactRepository {
    fn load_address_book(&self) -> RepoResult<AddressBook> {
        let mut stmt = self.conn.prepare(
            "SELECT position, name, phone, email, address
             FROM contacts
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            let position: i64 = row.get("position")?;
            let tags = load_tags_for_contact(&self.conn, position)?;
            contacts.push(parse_contact_row(row)?.with_tags(tags));
        }

        AddressBook::from_contacts(contacts).map_err(|err| RepoError::InvalidData(err.to_string()))
    }

    fn save_address_book(&mut self, book: &AddressBook) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM contact_tags;", [])?;
        tx.execute("DELETE FROM contacts;", [])?;

        for (position, contact) in book.contacts().iter().enumerate() {
            let position = i64::try_from(position)
                .map_err(|_| RepoError::InvalidData(format!("position {position} overflows")))?;
            tx.execute(
                "INSERT INTO contacts (position, name, phone, email, address)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    position,
                    contact.name.as_str(),
                    contact.phone.as_str(),
                    contact.email.as_str(),
                    contact.address.as_str(),
                ],
            )?;
            for tag in &contact.tags {
                tx.execute(
                    "INSERT INTO contact_tags (contact_position, tag) VALUES (?1, ?2);",
                    params![position, tag.as_str()],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let name: String = row.get("name")?;
    let phone: String = row.get("phone")?;
    let email: String = row.get("email")?;
    let address: String = row.get("address")?;

    Ok(Contact::new(
        Name::new(&name).map_err(invalid)?,
        Phone::new(&phone).map_err(invalid)?,
        Email::new(&email).map_err(invalid)?,
        Address::new(&address).map_err(invalid)?,
    ))
}

fn load_tags_for_contact(conn: &Connection, position: i64) -> RepoResult<BTreeSet<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT tag
         FROM contact_tags
         WHERE contact_position = ?1
         ORDER BY tag ASC;",
    )?;
    let mut rows = stmt.query([position])?;
    let mut tags = BTreeSet::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        tags.insert(Tag::new(&value).map_err(invalid)?);
    }
    Ok(tags)
}

fn invalid(err: impl Display) -> RepoError {
    RepoError::InvalidData(err.to_string())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
