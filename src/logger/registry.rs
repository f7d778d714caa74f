use super::config::LevelPlan;
use super::{Logger, ROOT_LOGGER_NAME};
use dashmap::DashMap;
use std::sync::{Arc, Weak};

/// Name-keyed store of [`Logger`] instances. Loggers are created on first
/// lookup and never removed.
#[derive(Debug)]
pub struct LoggerRegistry {
    this: Weak<LoggerRegistry>,
    root: Arc<Logger>,
    loggers: DashMap<String, Arc<Logger>>,
}

impl LoggerRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            root: Arc::new(Logger::new(ROOT_LOGGER_NAME, None, this.clone())),
            loggers: DashMap::new(),
        })
    }

    pub fn root(&self) -> &Arc<Logger> {
        &self.root
    }

    /// Get or create the logger for `name`. Missing ancestors of a dotted
    /// name are created along the way so the parent chain is always complete.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        let logger = self.get_or_create(name, false);
        if logger.is_placeholder() {
            logger.set_placeholder(false);
        }
        logger
    }

    fn get_or_create(&self, name: &str, as_ancestor: bool) -> Arc<Logger> {
        if name.is_empty() || name == ROOT_LOGGER_NAME {
            return Arc::clone(&self.root);
        }
        if let Some(existing) = self.loggers.get(name) {
            return Arc::clone(existing.value());
        }

        let parent = match name.rsplit_once('.') {
            Some((parent, _)) => self.get_or_create(parent, true),
            None => Arc::clone(&self.root),
        };
        self.loggers
            .entry(name.to_owned())
            .or_insert_with(|| {
                tracing::trace!(logger = name, placeholder = as_ancestor, "logger created");
                let logger = Logger::new(name, Some(parent), self.this.clone());
                logger.set_placeholder(as_ancestor);
                Arc::new(logger)
            })
            .value()
            .clone()
    }

    /// Lookup without creating.
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        if name.is_empty() || name == ROOT_LOGGER_NAME {
            return Some(Arc::clone(&self.root));
        }
        self.loggers.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of every non-root logger created so far, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub(crate) fn apply(&self, plan: &LevelPlan, disable_existing: bool, incremental: bool) {
        if !incremental {
            let existing: Vec<Arc<Logger>> =
                self.loggers.iter().map(|e| Arc::clone(e.value())).collect();
            for logger in existing {
                if plan.loggers.contains_key(logger.name()) {
                    continue;
                }
                if plan.is_below_configured(logger.name()) {
                    logger.set_level(None);
                    logger.set_disabled(false);
                } else if !logger.is_placeholder() {
                    logger.set_disabled(disable_existing);
                }
            }
        }

        for (name, level) in &plan.loggers {
            let logger = self.get_logger(name);
            logger.set_level(*level);
            if !incremental {
                logger.set_disabled(false);
            }
        }
        if let Some(level) = plan.root {
            self.root.set_level(level);
        }
    }
}
