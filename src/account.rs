//! Simple user accounts: names with unsalted SHA-256 password hashes, one `name:hash` per line.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use sha2::{Digest, Sha256};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("user name and password must not be empty")]
    EmptyCredentials,

    #[error("the passwords do not match")]
    PasswordMismatch,

    #[error("invalid user name '{0}'")]
    InvalidUsername(String),

    #[error("user '{0}' already exists")]
    UserExists(String),

    #[error("unknown user '{0}'")]
    UnknownUser(String),

    #[error("wrong password for user '{0}'")]
    WrongPassword(String),

    #[error("malformed credential line '{0}'")]
    Malformed(String),

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Trim a user name and make sure it can be stored in credential and record lines.
pub fn check_username(username: &str) -> Result<&str, AccountError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AccountError::EmptyCredentials);
    }
    if username.contains(|c: char| c == ':' || c == '|' || c.is_control()) {
        return Err(AccountError::InvalidUsername(username.to_string()));
    }
    Ok(username)
}

/// Lower case hex encoded SHA-256 of the password.
pub fn hash_password(password: &str) -> String {
    Sha256::digest(password.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.username, self.password_hash)
    }
}

impl FromStr for Credential {
    type Err = AccountError;

    fn from_str(line: &str) -> Result<Self, AccountError> {
        match line.split_once(':') {
            Some((username, hash)) if !username.is_empty() && !hash.is_empty() => {
                Ok(Credential {
                    username: username.to_string(),
                    password_hash: hash.to_string(),
                })
            }
            _ => Err(AccountError::Malformed(line.to_string())),
        }
    }
}

/// All registered users.
#[derive(Debug, Default)]
pub struct Accounts {
    users: BTreeMap<String, String>,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `name:hash` lines. Blank lines are skipped; the first entry for a name wins.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, AccountError> {
        let mut accounts = Accounts::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let credential: Credential = line.parse()?;
            accounts
                .users
                .entry(credential.username)
                .or_insert(credential.password_hash);
        }
        Ok(accounts)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), AccountError> {
        for credential in self.credentials() {
            writeln!(writer, "{}", credential)?;
        }
        Ok(())
    }

    pub fn credentials(&self) -> impl Iterator<Item = Credential> + '_ {
        self.users.iter().map(|(username, hash)| Credential {
            username: username.clone(),
            password_hash: hash.clone(),
        })
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Add a new user, returning the line to be stored for it.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Credential, AccountError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AccountError::EmptyCredentials);
        }
        if password != confirm {
            return Err(AccountError::PasswordMismatch);
        }
        let username = check_username(username)?;
        if self.contains(username) {
            return Err(AccountError::UserExists(username.to_string()));
        }

        let credential = Credential {
            username: username.to_string(),
            password_hash: hash_password(password),
        };
        self.users
            .insert(credential.username.clone(), credential.password_hash.clone());
        info!("Registered user {}", credential.username);
        Ok(credential)
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.authenticate(username, password).is_ok()
    }

    /// Like `verify`, but tells apart unknown users and wrong passwords.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), AccountError> {
        let username = username.trim();
        match self.users.get(username) {
            None => Err(AccountError::UnknownUser(username.to_string())),
            Some(hash) if *hash == hash_password(password) => Ok(()),
            Some(_) => Err(AccountError::WrongPassword(username.to_string())),
        }
    }
}
