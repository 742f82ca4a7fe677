/// The four notification moments in the lifecycle of a task block.
/// Each one is delivered at most once per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderClass {
    /// Heads up about 10 minutes before the task starts
    Before,
    /// The task is starting now
    OnStart,
    /// Halfway nudge
    Mid,
    /// The task just ended
    OnEnd,
}

impl ReminderClass {
    pub const ALL: [ReminderClass; 4] = [
        ReminderClass::Before,
        ReminderClass::OnStart,
        ReminderClass::Mid,
        ReminderClass::OnEnd,
    ];
}

/// Per user opt in / opt out for each [`ReminderClass`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSettings {
    pub remind_before: bool,
    pub remind_on_start: bool,
    pub nudge_mid: bool,
    pub congratulate_on_end: bool,
}

impl ReminderSettings {
    pub fn allows(&self, class: ReminderClass) -> bool {
        match class {
            ReminderClass::Before => self.remind_before,
            ReminderClass::OnStart => self.remind_on_start,
            ReminderClass::Mid => self.nudge_mid,
            ReminderClass::OnEnd => self.congratulate_on_end,
        }
    }
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            remind_before: true,
            remind_on_start: true,
            nudge_mid: true,
            congratulate_on_end: true,
        }
    }
}

/// Which notifications have already been delivered for a task block.
/// Flags only ever go from `false` to `true`, they are cleared by
/// replacing the whole task when a schedule is saved again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentFlags {
    pub sent_before: bool,
    pub sent_on_start: bool,
    pub sent_mid: bool,
    pub sent_on_end: bool,
}

impl SentFlags {
    pub fn is_sent(&self, class: ReminderClass) -> bool {
        match class {
            ReminderClass::Before => self.sent_before,
            ReminderClass::OnStart => self.sent_on_start,
            ReminderClass::Mid => self.sent_mid,
            ReminderClass::OnEnd => self.sent_on_end,
        }
    }

    pub fn mark_sent(&mut self, class: ReminderClass) {
        match class {
            ReminderClass::Before => self.sent_before = true,
            ReminderClass::OnStart => self.sent_on_start = true,
            ReminderClass::Mid => self.sent_mid = true,
            ReminderClass::OnEnd => self.sent_on_end = true,
        }
    }
}
