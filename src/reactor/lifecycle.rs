//! 反应器生命周期状态机
//! Reactor lifecycle state machine
//!
//! `Created → Running → Stopped`，`Stopped` 为终止状态，不可重新启动。
//!
//! `Created → Running → Stopped`, where `Stopped` is terminal and can never be
//! restarted.

use crate::{
    error::{Error, Result},
    event::ReactorId,
};
use tracing::{info, warn};

/// 反应器生命周期状态
/// Reactor lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactorState {
    /// 已创建，尚未运行
    /// Created, not yet running
    Created,
    /// 运行循环进行中
    /// Run-loop in progress
    Running,
    /// 已停止（终止状态）
    /// Stopped (terminal)
    Stopped,
}

impl ReactorState {
    pub fn name(&self) -> &'static str {
        match self {
            ReactorState::Created => "Created",
            ReactorState::Running => "Running",
            ReactorState::Stopped => "Stopped",
        }
    }

    /// 验证状态转换是否合法
    /// Validate if state transition is legal
    pub fn can_transition_to(&self, next: ReactorState) -> bool {
        use ReactorState::*;
        matches!((self, next), (Created, Running) | (Running, Stopped))
    }
}

impl std::fmt::Display for ReactorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 记录反应器当前的生命周期状态并执行转换
/// Tracks the reactor's lifecycle state and performs transitions
#[derive(Debug)]
pub(crate) struct Lifecycle {
    reactor: ReactorId,
    state: ReactorState,
}

impl Lifecycle {
    pub(crate) fn new(reactor: ReactorId) -> Self {
        Self {
            reactor,
            state: ReactorState::Created,
        }
    }

    pub(crate) fn state(&self) -> ReactorState {
        self.state
    }

    /// 执行状态转换
    /// Execute state transition
    pub(crate) fn transition(&mut self, next: ReactorState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            warn!(
                reactor = %self.reactor,
                current_state = %self.state,
                attempted_state = %next,
                "Invalid lifecycle transition attempted"
            );
            return Err(Error::InvalidTransition {
                from: self.state.name(),
                to: next.name(),
            });
        }
        info!(reactor = %self.reactor, from = %self.state, to = %next, "Reactor lifecycle transition");
        self.state = next;
        Ok(())
    }

    /// 可以开始运行：已运行返回 `AlreadyRunning`，已停止返回 `AlreadyStopped`
    /// Ready to start: `AlreadyRunning` when running, `AlreadyStopped` when stopped
    pub(crate) fn check_startable(&self) -> Result<()> {
        match self.state {
            ReactorState::Created => Ok(()),
            ReactorState::Running => Err(Error::AlreadyRunning),
            ReactorState::Stopped => Err(Error::AlreadyStopped),
        }
    }

    pub(crate) fn check_running(&self) -> Result<()> {
        match self.state {
            ReactorState::Running => Ok(()),
            ReactorState::Created => Err(Error::NotRunning),
            ReactorState::Stopped => Err(Error::AlreadyStopped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        use ReactorState::*;
        assert!(Created.can_transition_to(Running));
        assert!(Running.can_transition_to(Stopped));

        assert!(!Created.can_transition_to(Stopped));
        assert!(!Stopped.can_transition_to(Running));
        assert!(!Stopped.can_transition_to(Created));
        assert!(!Running.can_transition_to(Running));
    }

    #[test]
    fn test_lifecycle_rejects_restart() {
        let mut lifecycle = Lifecycle::new(ReactorId::next());
        assert!(lifecycle.check_startable().is_ok());
        lifecycle.transition(ReactorState::Running).unwrap();
        assert!(matches!(lifecycle.check_startable(), Err(Error::AlreadyRunning)));
        lifecycle.transition(ReactorState::Stopped).unwrap();

        assert!(matches!(lifecycle.check_startable(), Err(Error::AlreadyStopped)));
        assert!(matches!(lifecycle.check_running(), Err(Error::AlreadyStopped)));
        assert!(matches!(
            lifecycle.transition(ReactorState::Running),
            Err(Error::InvalidTransition { from: "Stopped", to: "Running" })
        ));
        assert_eq!(lifecycle.state(), ReactorState::Stopped);
    }

    #[test]
    fn test_not_running_before_start() {
        let lifecycle = Lifecycle::new(ReactorId::next());
        assert!(matches!(lifecycle.check_running(), Err(Error::NotRunning)));
    }
}
