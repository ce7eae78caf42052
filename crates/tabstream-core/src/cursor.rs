//! Streaming row cursor
//!
//! [`RowCursor`] gives index-addressable access to rows of a forward-only
//! [`RowSource`]. It keeps one live session and the one row it is positioned
//! on:
//!
//! - a request for the current index is answered from the cached row;
//! - a request further down pulls forward one row at a time;
//! - a request above the current index releases the session and pulls again
//!   from the top, costing `index + 1` pulls;
//! - a request past the end of the data yields [`Row::empty`].
//!
//! Sequential top-to-bottom access costs one pull per row.
//!
//! The cursor never owns its source; every operation borrows it. State is
//! committed after each pull, so cancellation (or dropping an in-flight
//! async call) leaves the cursor at its last committed position.

use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::row::Row;
use crate::source::{AsyncRowSource, BlockingRowSource, RowSource};

/// Cooperative cancellation flag checked before every pull
///
/// Clones share the flag, so one clone can be handed to the code that
/// decides to cancel.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    /// Create a flag that is not yet cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Observable cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No row has been pulled by the current session (or there is no session)
    Unopened,
    /// A live session is positioned on this row index
    Positioned(u32),
    /// The session ran out of rows before a request was satisfied
    Exhausted,
    /// Explicitly released
    Closed,
}

enum State<T> {
    Unopened,
    Live(Live<T>),
    Exhausted {
        last: Option<(u32, Row)>,
        pulls: u64,
    },
    Closed,
}

struct Live<T> {
    session: T,
    current: Option<(u32, Row)>,
    pulls: u64,
}

impl<T> Live<T> {
    fn position(&self) -> Option<u32> {
        self.current.as_ref().map(|(p, _)| *p)
    }

    fn next_index(&self) -> u32 {
        self.position().map_or(0, |p| p.saturating_add(1))
    }
}

enum Plan {
    Ready,
    Advance,
    Restart,
}

/// Random access over a forward-only row source
pub struct RowCursor<S: RowSource> {
    state: State<S::Session>,
}

impl<S: RowSource> RowCursor<S> {
    /// Create a cursor with no session
    pub fn new() -> Self {
        Self {
            state: State::Unopened,
        }
    }

    /// Current state
    pub fn state(&self) -> CursorState {
        match &self.state {
            State::Unopened => CursorState::Unopened,
            State::Live(live) => match live.position() {
                Some(p) => CursorState::Positioned(p),
                None => CursorState::Unopened,
            },
            State::Exhausted { .. } => CursorState::Exhausted,
            State::Closed => CursorState::Closed,
        }
    }

    /// Index of the last row the cursor positioned on, if any
    pub fn position(&self) -> Option<u32> {
        match &self.state {
            State::Live(live) => live.position(),
            State::Exhausted { last, .. } => last.as_ref().map(|(p, _)| *p),
            State::Unopened | State::Closed => None,
        }
    }

    /// Pulls made by the most recent session, including the final end-of-data pull
    pub fn session_pulls(&self) -> u64 {
        match &self.state {
            State::Live(live) => live.pulls,
            State::Exhausted { pulls, .. } => *pulls,
            State::Unopened | State::Closed => 0,
        }
    }

    fn plan(&self, index: u32) -> Plan {
        match &self.state {
            State::Unopened | State::Closed => Plan::Advance,
            State::Live(live) => match live.position() {
                Some(p) if index < p => Plan::Restart,
                Some(p) if index == p => Plan::Ready,
                _ => Plan::Advance,
            },
            State::Exhausted { last, .. } => match last {
                Some((p, _)) if index < *p => Plan::Restart,
                _ => Plan::Ready,
            },
        }
    }

    /// The row for `index` once an advance has settled
    fn settled(&self, index: u32) -> &Row {
        let current = match &self.state {
            State::Live(live) => live.current.as_ref(),
            State::Exhausted { last, .. } => last.as_ref(),
            State::Unopened | State::Closed => None,
        };
        match current {
            Some((p, row)) if *p == index => row,
            _ => Row::empty(),
        }
    }

    fn session_needed(&self) -> bool {
        matches!(self.state, State::Unopened | State::Closed)
    }

    fn commit_open(&mut self, session: S::Session) {
        tracing::debug!("Opened row session");
        self.state = State::Live(Live {
            session,
            current: None,
            pulls: 0,
        });
    }

    /// Record one pull. Returns the session if the source just ran dry.
    fn commit_pull(&mut self, pulled: Option<Row>) -> Option<S::Session> {
        let State::Live(live) = &mut self.state else {
            return None;
        };
        live.pulls += 1;
        match pulled {
            Some(row) => {
                let index = live.next_index();
                tracing::trace!("Pulled row {index}");
                live.current = Some((index, row));
                None
            }
            None => match mem::replace(&mut self.state, State::Closed) {
                State::Live(live) => {
                    tracing::debug!(
                        "Row source exhausted after {} pulls (last row: {:?})",
                        live.pulls,
                        live.position()
                    );
                    self.state = State::Exhausted {
                        last: live.current,
                        pulls: live.pulls,
                    };
                    Some(live.session)
                }
                other => {
                    self.state = other;
                    None
                }
            },
        }
    }

    /// Whether another pull is needed to reach `index`
    fn wants_pull(&self, index: u32) -> bool {
        match &self.state {
            State::Live(live) => live.position() != Some(index),
            _ => false,
        }
    }

    fn take_session(&mut self) -> Option<S::Session> {
        match mem::replace(&mut self.state, State::Closed) {
            State::Live(live) => Some(live.session),
            _ => None,
        }
    }

    fn live_session(&mut self) -> Option<&mut S::Session> {
        match &mut self.state {
            State::Live(live) => Some(&mut live.session),
            _ => None,
        }
    }
}

fn check(cancel: Option<&Cancellation>) -> Result<()> {
    match cancel {
        Some(c) if c.is_cancelled() => Err(Error::Cancelled),
        _ => Ok(()),
    }
}

impl<S: BlockingRowSource> RowCursor<S> {
    /// Get the row at a zero-based index
    ///
    /// Returns [`Row::empty`] if the source ends before `index`.
    pub fn get(&mut self, source: &S, index: u32) -> Result<&Row> {
        self.advance(source, index, None)?;
        Ok(self.settled(index))
    }

    /// Like [`get`](Self::get), checking `cancel` before every pull
    pub fn get_with_cancel(
        &mut self,
        source: &S,
        index: u32,
        cancel: &Cancellation,
    ) -> Result<&Row> {
        self.advance(source, index, Some(cancel))?;
        Ok(self.settled(index))
    }

    fn advance(&mut self, source: &S, index: u32, cancel: Option<&Cancellation>) -> Result<()> {
        match self.plan(index) {
            Plan::Ready => return Ok(()),
            Plan::Restart => {
                check(cancel)?;
                tracing::debug!("Restarting row session to reach row {index}");
                self.release(source)?;
            }
            Plan::Advance => {}
        }

        if self.session_needed() {
            check(cancel)?;
            let session = source.open()?;
            self.commit_open(session);
        }

        while self.wants_pull(index) {
            check(cancel)?;
            let pulled = match self.live_session() {
                Some(session) => source.next_row(session)?,
                None => break,
            };
            if let Some(spent) = self.commit_pull(pulled) {
                source.release(spent)?;
            }
        }
        Ok(())
    }

    /// Release the live session, if any. Safe to call in any state.
    pub fn release(&mut self, source: &S) -> Result<()> {
        if let Some(session) = self.take_session() {
            tracing::debug!("Releasing row session");
            source.release(session)?;
        }
        Ok(())
    }
}

impl<S: AsyncRowSource> RowCursor<S> {
    /// Get the row at a zero-based index from a suspending source
    pub async fn get_async(&mut self, source: &S, index: u32) -> Result<&Row> {
        self.advance_async(source, index, None).await?;
        Ok(self.settled(index))
    }

    /// Like [`get_async`](Self::get_async), checking `cancel` before every pull
    pub async fn get_async_with_cancel(
        &mut self,
        source: &S,
        index: u32,
        cancel: &Cancellation,
    ) -> Result<&Row> {
        self.advance_async(source, index, Some(cancel)).await?;
        Ok(self.settled(index))
    }

    async fn advance_async(
        &mut self,
        source: &S,
        index: u32,
        cancel: Option<&Cancellation>,
    ) -> Result<()> {
        match self.plan(index) {
            Plan::Ready => return Ok(()),
            Plan::Restart => {
                check(cancel)?;
                tracing::debug!("Restarting row session to reach row {index}");
                self.release_async(source).await?;
            }
            Plan::Advance => {}
        }

        if self.session_needed() {
            check(cancel)?;
            let session = source.open_async().await?;
            self.commit_open(session);
        }

        while self.wants_pull(index) {
            check(cancel)?;
            let pulled = match self.live_session() {
                Some(session) => source.next_row_async(session).await?,
                None => break,
            };
            if let Some(spent) = self.commit_pull(pulled) {
                source.release_async(spent).await?;
            }
        }
        Ok(())
    }

    /// Release the live session, if any. Safe to call in any state.
    pub async fn release_async(&mut self, source: &S) -> Result<()> {
        if let Some(session) = self.take_session() {
            tracing::debug!("Releasing row session");
            source.release_async(session).await?;
        }
        Ok(())
    }
}

impl<S: RowSource> Default for RowCursor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RowSource> fmt::Debug for RowCursor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowCursor")
            .field("state", &self.state())
            .field("session_pulls", &self.session_pulls())
            .finish()
    }
}

impl<S: RowSource> Drop for RowCursor<S> {
    fn drop(&mut self) {
        if matches!(self.state, State::Live(_)) {
            tracing::debug!("Row cursor dropped with a live session; dropping it unreleased");
        }
    }
}
