//! Line-oriented command scripts.
//!
//! A script is a sequence of commands, one per line, space-separated
//! tokens. The verbs:
//!
//! ```text
//! AddUser <name> <password>
//! Authenticate <name> <password>
//! AddUserToGroup <user> <group>
//! AddObjectToGroup <object> <group>
//! AddAccess <operation> <userGroup> [<objectGroup>]
//! CanAccess <operation> <user> [<object>]
//! ```
//!
//! A structurally invalid line (unrecognized verb, wrong token count)
//! aborts the run with a [`ScriptError`]. Validation failures raised by
//! the engine are recorded as [`OutcomeKind::Rejected`] and the run
//! continues with the next command.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

use warden_access::{AccessChecker, AccessControlStore, AuditLog};
use warden_core::error::AccessError;
use warden_core::types::AccessQuery;

/// Structural script errors. These abort the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The line's first token is not a known verb
    #[error("Unrecognized command '{verb}' on line {line}")]
    UnknownCommand { line: usize, verb: String },

    /// The verb is known but the token count is wrong
    #[error("Wrong number of arguments for '{verb}' on line {line}: expected {expected}, got {got}")]
    BadArity {
        line: usize,
        verb: String,
        expected: &'static str,
        got: usize,
    },
}

/// A parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddUser {
        name: String,
        password: String,
    },
    Authenticate {
        name: String,
        password: String,
    },
    AddUserToGroup {
        user: String,
        group: String,
    },
    AddObjectToGroup {
        object: String,
        group: String,
    },
    AddAccess {
        operation: String,
        user_group: String,
        object_group: Option<String>,
    },
    CanAccess {
        operation: String,
        user: String,
        object: Option<String>,
    },
}

impl Command {
    /// Parse one script line. Returns `Ok(None)` for a blank line.
    ///
    /// `line_no` is 1-based and appears only in errors.
    pub fn parse(line_no: usize, line: &str) -> Result<Option<Command>, ScriptError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let bad_arity = |expected: &'static str| ScriptError::BadArity {
            line: line_no,
            verb: verb.to_string(),
            expected,
            got: args.len(),
        };

        let command = match verb {
            "AddUser" => match args {
                [name, password] => Command::AddUser {
                    name: (*name).to_string(),
                    password: (*password).to_string(),
                },
                _ => return Err(bad_arity("2")),
            },
            "Authenticate" => match args {
                [name, password] => Command::Authenticate {
                    name: (*name).to_string(),
                    password: (*password).to_string(),
                },
                _ => return Err(bad_arity("2")),
            },
            "AddUserToGroup" => match args {
                [user, group] => Command::AddUserToGroup {
                    user: (*user).to_string(),
                    group: (*group).to_string(),
                },
                _ => return Err(bad_arity("2")),
            },
            "AddObjectToGroup" => match args {
                [object, group] => Command::AddObjectToGroup {
                    object: (*object).to_string(),
                    group: (*group).to_string(),
                },
                _ => return Err(bad_arity("2")),
            },
            "AddAccess" => match args {
                [operation, user_group] => Command::AddAccess {
                    operation: (*operation).to_string(),
                    user_group: (*user_group).to_string(),
                    object_group: None,
                },
                [operation, user_group, object_group] => Command::AddAccess {
                    operation: (*operation).to_string(),
                    user_group: (*user_group).to_string(),
                    object_group: Some((*object_group).to_string()),
                },
                _ => return Err(bad_arity("2 or 3")),
            },
            "CanAccess" => match args {
                [operation, user] => Command::CanAccess {
                    operation: (*operation).to_string(),
                    user: (*user).to_string(),
                    object: None,
                },
                [operation, user, object] => Command::CanAccess {
                    operation: (*operation).to_string(),
                    user: (*user).to_string(),
                    object: Some((*object).to_string()),
                },
                _ => return Err(bad_arity("2 or 3")),
            },
            _ => {
                return Err(ScriptError::UnknownCommand {
                    line: line_no,
                    verb: verb.to_string(),
                })
            }
        };

        Ok(Some(command))
    }
}

/// What happened when one command was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// 1-based script line the command came from
    pub line: usize,

    /// The command's result
    pub kind: OutcomeKind,

    /// Rendered registry state, present when state echo is enabled
    pub state: Option<String>,
}

/// The result of a single command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    /// The mutation or authentication succeeded
    Applied(String),

    /// A `CanAccess` verdict
    Verdict { granted: bool, summary: String },

    /// The engine rejected the command; the run continues
    Rejected(AccessError),
}

/// Executes parsed commands against an owned store.
///
/// The runner carries the access-check audit trail and, when enabled,
/// echoes registry state after each command the way the interactive
/// tooling expects.
pub struct ScriptRunner {
    store: AccessControlStore,
    audit: Option<AuditLog>,
    echo_state: bool,
}

impl ScriptRunner {
    /// Create a runner over an existing store (possibly restored from a
    /// snapshot).
    pub fn new(store: AccessControlStore) -> Self {
        Self {
            store,
            audit: None,
            echo_state: false,
        }
    }

    /// Enable the access-check audit trail. A capacity of 0 disables it.
    pub fn with_audit(mut self, capacity: usize) -> Self {
        if capacity > 0 {
            self.audit = Some(AuditLog::new(capacity));
        }
        self
    }

    /// Enable or disable state echo after each command.
    pub fn echo_state(mut self, echo: bool) -> Self {
        self.echo_state = echo;
        self
    }

    /// Run a whole script, collecting one [`Outcome`] per command.
    ///
    /// Stops at the first structurally invalid line; engine rejections are
    /// recorded and the run continues.
    pub fn run_script(&mut self, script: &str) -> Result<Vec<Outcome>, ScriptError> {
        let mut outcomes = Vec::new();
        for (index, raw) in script.lines().enumerate() {
            let line_no = index + 1;
            let Some(command) = Command::parse(line_no, raw)? else {
                continue;
            };
            debug!(line = line_no, "applying command");
            outcomes.push(self.apply(line_no, command));
        }
        Ok(outcomes)
    }

    /// Apply one parsed command.
    pub fn apply(&mut self, line: usize, command: Command) -> Outcome {
        let kind = self.dispatch(command);
        let state = self
            .echo_state
            .then(|| crate::report::render_all(&self.store.export()));
        Outcome { line, kind, state }
    }

    fn dispatch(&mut self, command: Command) -> OutcomeKind {
        match command {
            Command::AddUser { name, password } => {
                match self.store.register_user(&name, &password) {
                    Ok(()) => OutcomeKind::Applied(format!("registered user '{}'", name)),
                    Err(err) => OutcomeKind::Rejected(err),
                }
            }
            Command::Authenticate { name, password } => {
                match self.store.authenticate(&name, &password) {
                    Ok(()) => OutcomeKind::Applied(format!("authenticated user '{}'", name)),
                    Err(err) => OutcomeKind::Rejected(err),
                }
            }
            Command::AddUserToGroup { user, group } => {
                match self.store.add_user_to_group(&user, &group) {
                    Ok(members) => OutcomeKind::Applied(format!(
                        "user group '{}' now has members: {}",
                        group,
                        join(members)
                    )),
                    Err(err) => OutcomeKind::Rejected(err),
                }
            }
            Command::AddObjectToGroup { object, group } => {
                let members = self.store.add_object_to_group(&object, &group);
                OutcomeKind::Applied(format!(
                    "object group '{}' now has objects: {}",
                    group,
                    join(members)
                ))
            }
            Command::AddAccess {
                operation,
                user_group,
                object_group,
            } => match self
                .store
                .add_rule(&operation, &user_group, object_group.as_deref())
            {
                Ok(entries) => OutcomeKind::Applied(format!(
                    "operation '{}' now has {} rule(s)",
                    operation,
                    entries.len()
                )),
                Err(err) => OutcomeKind::Rejected(err),
            },
            Command::CanAccess {
                operation,
                user,
                object,
            } => {
                let query = match object {
                    Some(object) => AccessQuery::on_object(operation, user, object),
                    None => AccessQuery::new(operation, user),
                };
                match self.decide(&query) {
                    Ok(granted) => OutcomeKind::Verdict {
                        granted,
                        summary: query.to_string(),
                    },
                    Err(err) => OutcomeKind::Rejected(err),
                }
            }
        }
    }

    /// Decide a query through the checker, keeping the audit trail across
    /// commands.
    fn decide(&mut self, query: &AccessQuery) -> Result<bool, AccessError> {
        let mut checker = match self.audit.take() {
            Some(log) => AccessChecker::with_audit(&self.store, log),
            None => AccessChecker::new(&self.store),
        };
        let result = checker.check(query);
        self.audit = checker.into_audit_log();
        result
    }

    /// The underlying store.
    pub fn store(&self) -> &AccessControlStore {
        &self.store
    }

    /// Consume the runner and return the store, e.g. to export a snapshot.
    pub fn into_store(self) -> AccessControlStore {
        self.store
    }

    /// The audit trail, if enabled.
    pub fn audit(&self) -> Option<&AuditLog> {
        self.audit.as_ref()
    }
}

fn join(members: &BTreeSet<String>) -> String {
    members
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_verb() {
        assert_eq!(
            Command::parse(1, "AddUser alice pw1").unwrap(),
            Some(Command::AddUser {
                name: "alice".to_string(),
                password: "pw1".to_string(),
            })
        );
        assert_eq!(
            Command::parse(2, "Authenticate alice pw1").unwrap(),
            Some(Command::Authenticate {
                name: "alice".to_string(),
                password: "pw1".to_string(),
            })
        );
        assert_eq!(
            Command::parse(3, "AddUserToGroup alice admins").unwrap(),
            Some(Command::AddUserToGroup {
                user: "alice".to_string(),
                group: "admins".to_string(),
            })
        );
        assert_eq!(
            Command::parse(4, "AddObjectToGroup file1 docs").unwrap(),
            Some(Command::AddObjectToGroup {
                object: "file1".to_string(),
                group: "docs".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_optional_third_argument() {
        assert_eq!(
            Command::parse(1, "AddAccess delete admins").unwrap(),
            Some(Command::AddAccess {
                operation: "delete".to_string(),
                user_group: "admins".to_string(),
                object_group: None,
            })
        );
        assert_eq!(
            Command::parse(2, "AddAccess read editors docs").unwrap(),
            Some(Command::AddAccess {
                operation: "read".to_string(),
                user_group: "editors".to_string(),
                object_group: Some("docs".to_string()),
            })
        );
        assert_eq!(
            Command::parse(3, "CanAccess read alice file1").unwrap(),
            Some(Command::CanAccess {
                operation: "read".to_string(),
                user: "alice".to_string(),
                object: Some("file1".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse(1, "").unwrap(), None);
        assert_eq!(Command::parse(2, "   ").unwrap(), None);
    }

    #[test]
    fn test_parse_unknown_verb() {
        let err = Command::parse(7, "DropUser alice").unwrap_err();
        assert_eq!(
            err,
            ScriptError::UnknownCommand {
                line: 7,
                verb: "DropUser".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_bad_arity() {
        let err = Command::parse(3, "AddUser alice").unwrap_err();
        assert!(matches!(err, ScriptError::BadArity { line: 3, .. }));

        let err = Command::parse(4, "CanAccess read alice file1 extra").unwrap_err();
        assert!(matches!(err, ScriptError::BadArity { line: 4, .. }));
    }

    #[test]
    fn test_run_script_scenario() {
        let script = "\
AddUser alice pw1
AddUserToGroup alice admins
AddAccess delete admins
CanAccess delete alice
CanAccess delete alice file1
";
        let mut runner = ScriptRunner::new(AccessControlStore::new());
        let outcomes = runner.run_script(script).unwrap();
        assert_eq!(outcomes.len(), 5);

        // The object-less query is granted via the object-agnostic rule
        assert_eq!(
            outcomes[3].kind,
            OutcomeKind::Verdict {
                granted: true,
                summary: "user 'alice' delete".to_string(),
            }
        );

        // file1 was never placed in any object group
        assert_eq!(
            outcomes[4].kind,
            OutcomeKind::Rejected(AccessError::UnknownObject("file1".to_string()))
        );
    }

    #[test]
    fn test_rejections_do_not_abort_the_run() {
        let script = "\
AddUser alice pw1
AddUser alice other
AddUser bob pw2
";
        let mut runner = ScriptRunner::new(AccessControlStore::new());
        let outcomes = runner.run_script(script).unwrap();

        assert_eq!(outcomes.len(), 3);
        assert_eq!(
            outcomes[1].kind,
            OutcomeKind::Rejected(AccessError::AlreadyExists("alice".to_string()))
        );
        // The run continued and bob was registered
        assert!(runner.store().authenticate("bob", "pw2").is_ok());
    }

    #[test]
    fn test_structural_error_aborts_the_run() {
        let script = "\
AddUser alice pw1
Frobnicate everything
AddUser bob pw2
";
        let mut runner = ScriptRunner::new(AccessControlStore::new());
        let err = runner.run_script(script).unwrap_err();
        assert!(matches!(err, ScriptError::UnknownCommand { line: 2, .. }));

        // Commands before the bad line were applied, later ones were not
        assert!(runner.store().authenticate("alice", "pw1").is_ok());
        assert!(runner.store().authenticate("bob", "pw2").is_err());
    }

    #[test]
    fn test_echo_state() {
        let mut runner = ScriptRunner::new(AccessControlStore::new()).echo_state(true);
        let outcomes = runner.run_script("AddUser alice pw1\n").unwrap();

        let state = outcomes[0].state.as_deref().unwrap();
        assert!(state.contains("alice"));
        assert!(state.contains("Access rules:"));
    }

    #[test]
    fn test_audit_trail_records_checks() {
        let script = "\
AddUser alice pw1
AddUserToGroup alice admins
AddAccess delete admins
CanAccess delete alice
CanAccess rename alice
";
        let mut runner = ScriptRunner::new(AccessControlStore::new()).with_audit(16);
        runner.run_script(script).unwrap();

        // Only CanAccess commands are audited
        assert_eq!(runner.audit().unwrap().len(), 2);
    }
}
