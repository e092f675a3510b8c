// SPDX-License-Identifier: Apache-2.0

use super::State;
use crate::Error;

/// One open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StackItem {
    /// State active when the container was opened.
    pub prev_state: State,
    /// `Object` or `Array`: the state the container was opened into.
    pub next_state: State,
}

const EMPTY_ITEM: StackItem = StackItem {
    prev_state: State::Start,
    next_state: State::Start,
};

/// Push-down stack of open containers, at most `DEPTH - 1` deep.
#[derive(Debug, Clone)]
pub(crate) struct StateStack<const DEPTH: usize> {
    items: [StackItem; DEPTH],
    level: usize,
}

impl<const DEPTH: usize> StateStack<DEPTH> {
    pub fn new() -> Self {
        Self {
            items: [EMPTY_ITEM; DEPTH],
            level: 0,
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn push(&mut self, prev_state: State, next_state: State) -> Result<(), Error> {
        if self.level + 1 >= DEPTH {
            return Err(Error::DepthExceeded);
        }
        let slot = self.items.get_mut(self.level).ok_or(Error::DepthExceeded)?;
        *slot = StackItem {
            prev_state,
            next_state,
        };
        self.level += 1;
        Ok(())
    }

    /// The innermost open container.
    pub fn top(&self) -> Result<StackItem, Error> {
        self.level
            .checked_sub(1)
            .and_then(|index| self.items.get(index))
            .copied()
            .ok_or(Error::ParsingError)
    }

    pub fn pop(&mut self) -> Result<StackItem, Error> {
        let item = self.top()?;
        self.level -= 1;
        Ok(item)
    }

    pub fn clear(&mut self) {
        self.level = 0;
    }
}
