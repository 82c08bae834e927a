//! Breadth-first compromise propagation.
//!
//! The traversal walks an implicit bipartite graph: user → computer edges come
//! from activity records and computer → user edges come from access records.
//! Activity entries on a computer are written to the trace but never drive
//! expansion; any user observed on a reached computer counts as affected,
//! whatever the activity type.
//!
//! # Ordering
//!
//! Users are expanded strictly in discovery order (FIFO). Within one user,
//! computers follow record order; within one computer, users follow record
//! order. The trace is produced from the queue and the record sequences only,
//! never from set iteration, so it is reproducible run to run.

use crate::domain::{ComputerId, UserId};
use crate::index::LogIndex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// One entry of the investigation trace.
///
/// `Display` renders the exact trace line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A traversal began from `seed`.
    Started {
        /// The suspicious user
        seed: UserId,
    },
    /// A user was dequeued for expansion.
    Processing {
        /// The user being expanded
        user: UserId,
    },
    /// A computer was reached for the first time.
    ComputerAccessed {
        /// User whose activity reached the computer
        user: UserId,
        /// The newly affected computer
        computer: ComputerId,
    },
    /// Header preceding the activity listing of a computer.
    ActivitiesHeader {
        /// Computer whose activities follow
        computer: ComputerId,
    },
    /// One recorded activity on the computer named by the preceding header.
    Activity {
        /// User the activity is attributed to
        user: UserId,
        /// Activity label
        activity_type: String,
    },
    /// A user was newly marked affected through a computer.
    UserAffected {
        /// Computer the user was observed on
        computer: ComputerId,
        /// The newly affected user
        user: UserId,
    },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { seed } => write!(f, "Analysis started with suspicious user {seed}"),
            Self::Processing { user } => write!(f, "Processing user: {user}"),
            Self::ComputerAccessed { user, computer } => {
                write!(f, "User {user} accessed computer {computer}")
            }
            Self::ActivitiesHeader { computer } => write!(f, "Activities on computer {computer}:"),
            Self::Activity {
                user,
                activity_type,
            } => write!(f, "  - {activity_type} by user {user}"),
            Self::UserAffected { computer, user } => {
                write!(f, "Computer {computer} affected user {user}")
            }
        }
    }
}

/// Append-only ordered trace of a traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<TraceEvent>,
}

impl EventLog {
    fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// The recorded events, in emission order.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Rendered trace lines, in emission order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Finished result of a traversal.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    log: EventLog,
    affected_users: HashSet<UserId>,
    affected_computers: HashSet<ComputerId>,
    hops: HashMap<UserId, usize>,
}

impl Analysis {
    /// The ordered trace.
    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Every user that entered the visited set.
    #[must_use]
    pub fn affected_users(&self) -> &HashSet<UserId> {
        &self.affected_users
    }

    /// Every computer that entered the visited set.
    #[must_use]
    pub fn affected_computers(&self) -> &HashSet<ComputerId> {
        &self.affected_computers
    }

    /// Breadth-first layer at which each affected user was discovered.
    ///
    /// The seed is layer 0; users found through the seed's computers are
    /// layer 1, and so on.
    #[must_use]
    pub fn hops(&self) -> &HashMap<UserId, usize> {
        &self.hops
    }
}

/// Traversal context: the visited sets, hop layers, and trace of one
/// investigation over a shared [`LogIndex`].
///
/// Calling [`propagate`](Self::propagate) more than once accumulates into the
/// same visited sets and trace; nothing is reset between calls. Users and
/// computers reached by an earlier call are not expanded again, and a repeated
/// seed only produces its start and processing lines. Use [`analyze`] for an
/// independent run.
#[derive(Debug)]
pub struct Investigation<'a> {
    index: &'a LogIndex,
    visited_users: HashSet<UserId>,
    visited_computers: HashSet<ComputerId>,
    hops: HashMap<UserId, usize>,
    log: EventLog,
}

impl<'a> Investigation<'a> {
    /// Create an empty investigation over `index`.
    #[must_use]
    pub fn new(index: &'a LogIndex) -> Self {
        Self {
            index,
            visited_users: HashSet::new(),
            visited_computers: HashSet::new(),
            hops: HashMap::new(),
            log: EventLog::default(),
        }
    }

    /// Run a breadth-first traversal from `seed` to completion.
    pub fn propagate(&mut self, seed: &UserId) {
        let index = self.index;
        let mut queue: VecDeque<(UserId, usize)> = VecDeque::new();
        queue.push_back((seed.clone(), 0));
        self.visited_users.insert(seed.clone());
        self.hops.entry(seed.clone()).or_insert(0);
        self.log.push(TraceEvent::Started { seed: seed.clone() });

        while let Some((current, depth)) = queue.pop_front() {
            tracing::debug!(user = %current, depth, "Processing user");
            self.log.push(TraceEvent::Processing {
                user: current.clone(),
            });

            for computer in index.computers_for(&current) {
                if !self.visited_computers.insert(computer.clone()) {
                    continue;
                }
                self.expand_computer(&current, computer, depth, &mut queue);
            }
        }

        tracing::info!(
            seed = %seed,
            affected_users = self.visited_users.len(),
            affected_computers = self.visited_computers.len(),
            "Propagation complete"
        );
    }

    /// Log a newly reached computer and enqueue its unvisited users.
    fn expand_computer(
        &mut self,
        user: &UserId,
        computer: &ComputerId,
        depth: usize,
        queue: &mut VecDeque<(UserId, usize)>,
    ) {
        let index = self.index;
        tracing::trace!(user = %user, computer = %computer, "Expanding computer");

        self.log.push(TraceEvent::ComputerAccessed {
            user: user.clone(),
            computer: computer.clone(),
        });
        self.log.push(TraceEvent::ActivitiesHeader {
            computer: computer.clone(),
        });
        for activity in index.activities_on(computer) {
            self.log.push(TraceEvent::Activity {
                user: activity.user_id.clone(),
                activity_type: activity.activity_type.clone(),
            });
        }

        for affected in index.users_on(computer) {
            if self.visited_users.insert(affected.clone()) {
                self.hops.insert(affected.clone(), depth + 1);
                queue.push_back((affected.clone(), depth + 1));
                self.log.push(TraceEvent::UserAffected {
                    computer: computer.clone(),
                    user: affected.clone(),
                });
            }
        }
    }

    /// Users affected so far.
    #[must_use]
    pub fn affected_user_count(&self) -> usize {
        self.visited_users.len()
    }

    /// Computers affected so far.
    #[must_use]
    pub fn affected_computer_count(&self) -> usize {
        self.visited_computers.len()
    }

    /// The trace recorded so far.
    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Finalize the investigation.
    #[must_use]
    pub fn finish(self) -> Analysis {
        Analysis {
            log: self.log,
            affected_users: self.visited_users,
            affected_computers: self.visited_computers,
            hops: self.hops,
        }
    }
}

/// Analyze the blast radius of `seed` with a fresh traversal context.
///
/// # Examples
///
/// ```
/// use breachtrace::domain::{AccessRecord, ActivityRecord, UserId};
/// use breachtrace::index::LogIndex;
/// use breachtrace::propagation::analyze;
///
/// let index = LogIndex::from_records(
///     [ActivityRecord::new("U1", "C1")],
///     [AccessRecord::new("C1", "U2", "login")],
/// );
/// let analysis = analyze(&index, &UserId::from("U1"));
///
/// assert_eq!(analysis.affected_users().len(), 2);
/// assert_eq!(analysis.affected_computers().len(), 1);
/// ```
#[must_use]
pub fn analyze(index: &LogIndex, seed: &UserId) -> Analysis {
    let mut investigation = Investigation::new(index);
    investigation.propagate(seed);
    investigation.finish()
}
