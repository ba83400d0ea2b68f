//! src/subscriber_store.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::{PhoneNumber, SubscriptionStatus};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("failed to access the subscriber list file")]
    Io(#[from] std::io::Error),
    #[error("invalid subscriber row at line {line}: {reason}")]
    Format { line: usize, reason: String },
}

/// The subscriber list: a map from phone number to subscription status,
/// backed by a CSV file of `number,flag` rows.
///
/// The full list is loaded once at startup and re-persisted on every upsert,
/// so webhook-driven changes survive a restart. All access goes through the
/// inner mutex; none of the methods await while holding it.
#[derive(Debug)]
pub struct SubscriberStore {
    subscribers: Mutex<HashMap<PhoneNumber, SubscriptionStatus>>,
    file: PathBuf,
}

impl SubscriberStore {
    /// An empty store that will persist to `file` on the first upsert.
    pub fn empty(file: impl Into<PathBuf>) -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            file: file.into(),
        }
    }

    /// Load the subscriber list from its CSV file.
    ///
    /// Rows must have the shape `number,flag` with flag `yes` or `no`; a later
    /// row overwrites an earlier one with the same number.
    pub fn load(file: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file = file.into();
        let contents = std::fs::read_to_string(&file)?;
        let mut subscribers = HashMap::new();
        for (i, row) in contents.lines().enumerate() {
            let line = i + 1;
            if row.trim().is_empty() {
                continue;
            }
            let (number, flag) = row.split_once(',').ok_or_else(|| StoreError::Format {
                line,
                reason: "expected `number,flag`".into(),
            })?;
            let number =
                PhoneNumber::parse(number.to_owned()).map_err(|e| StoreError::Format {
                    line,
                    reason: e.to_string(),
                })?;
            let status = SubscriptionStatus::parse(flag).map_err(|e| StoreError::Format {
                line,
                reason: e.to_string(),
            })?;
            subscribers.insert(number, status);
        }
        Ok(Self {
            subscribers: Mutex::new(subscribers),
            file,
        })
    }

    /// Insert or overwrite the status of a number and re-persist the list.
    ///
    /// The in-memory update always takes effect; only writing the backing file
    /// can fail.
    pub fn upsert(&self, number: PhoneNumber, status: SubscriptionStatus) -> Result<(), StoreError> {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.insert(number, status);
        persist(&self.file, &subscribers)?;
        Ok(())
    }

    /// The numbers currently subscribed. Ordering is unspecified.
    pub fn active_subscribers(&self) -> Vec<PhoneNumber> {
        self.subscribers
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, status)| **status == SubscriptionStatus::Subscribed)
            .map(|(number, _)| number.clone())
            .collect()
    }

    pub fn active_subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap()
            .values()
            .filter(|status| **status == SubscriptionStatus::Subscribed)
            .count()
    }

    pub fn status_of(&self, number: &PhoneNumber) -> Option<SubscriptionStatus> {
        self.subscribers.lock().unwrap().get(number).copied()
    }
}

/// Write the full table to a sibling temp file, then rename it into place so
/// a crash mid-write never truncates the list.
fn persist(
    file: &Path,
    subscribers: &HashMap<PhoneNumber, SubscriptionStatus>,
) -> Result<(), std::io::Error> {
    let mut contents = String::new();
    for (number, status) in subscribers {
        contents.push_str(number.as_ref());
        contents.push(',');
        contents.push_str(status.as_str());
        contents.push('\n');
    }
    let tmp = file.with_extension("csv.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, file)?;
    Ok(())
}
