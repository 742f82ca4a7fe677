use crate::{
    reminder::{ReminderClass, ReminderSettings, SentFlags},
    shared::entity::{Entity, ID},
    timeofday::TimeOfDay,
};

/// How many minutes before the start of a task the heads up
/// reminder is aimed at
const HEADS_UP_LEAD: i64 = 10;
/// Acceptable drift in minutes around each reminder moment
const MOMENT_SLACK: i64 = 2;

/// A single planned block of work on some day schedule.
///
/// Times are wall clock times in the owning user's timezone. The end
/// is not required to be after the start, blocks that wrap around or
/// are entered backwards are kept as given.
#[derive(Debug, Clone)]
pub struct TaskBlock {
    pub id: ID,
    /// Client supplied identifier, unique among all tasks of the owning user
    pub external_id: String,
    pub schedule_id: ID,
    pub user_id: ID,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub description: String,
    pub completed: bool,
    pub completed_at: Option<i64>,
    pub sent: SentFlags,
}

impl TaskBlock {
    pub fn new(
        external_id: String,
        schedule_id: ID,
        user_id: ID,
        start: TimeOfDay,
        end: TimeOfDay,
        description: String,
    ) -> Self {
        Self {
            id: Default::default(),
            external_id,
            schedule_id,
            user_id,
            start,
            end,
            description,
            completed: false,
            completed_at: None,
            sent: Default::default(),
        }
    }

    fn window_matches(&self, class: ReminderClass, now_minutes: i64) -> bool {
        let start = self.start.minutes_of_day();
        let end = self.end.minutes_of_day();
        match class {
            ReminderClass::Before => (start - now_minutes - HEADS_UP_LEAD).abs() <= MOMENT_SLACK,
            ReminderClass::OnStart => (now_minutes - start).abs() <= MOMENT_SLACK,
            ReminderClass::Mid => {
                let midpoint = (start + end) / 2;
                (now_minutes - midpoint).abs() <= MOMENT_SLACK
            }
            ReminderClass::OnEnd => (now_minutes - end).abs() <= MOMENT_SLACK,
        }
    }

    /// Which reminders should go out for this task at the given wall clock
    /// minute. Every class is decided on its own, so several classes can be
    /// due at the same time for short tasks. Completed tasks are never
    /// reminded about and classes that were already delivered or that the
    /// user has disabled are skipped.
    pub fn due_reminders(
        &self,
        now_minutes: i64,
        settings: &ReminderSettings,
    ) -> Vec<ReminderClass> {
        if self.completed {
            return vec![];
        }

        ReminderClass::ALL
            .iter()
            .copied()
            .filter(|class| settings.allows(*class))
            .filter(|class| !self.sent.is_sent(*class))
            .filter(|class| self.window_matches(*class, now_minutes))
            .collect()
    }
}

impl Entity<ID> for TaskBlock {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn task(start: &str, end: &str) -> TaskBlock {
        TaskBlock::new(
            "task-1".into(),
            Default::default(),
            Default::default(),
            start.parse().unwrap(),
            end.parse().unwrap(),
            "Deep work".into(),
        )
    }

    #[test]
    fn it_sends_heads_up_before_start() {
        let task = task("10:00", "11:00");
        let settings = ReminderSettings::default();

        // Start is minute 600, the lead window is 588 to 592
        let cases = vec![
            (587, false),
            (588, true),
            (590, true),
            (592, true),
            (593, false),
        ];
        for (now, due) in cases {
            let classes = task.due_reminders(now, &settings);
            assert_eq!(classes.contains(&ReminderClass::Before), due, "now: {}", now);
        }
    }

    #[test]
    fn it_sends_reminder_around_start() {
        let task = task("10:00", "11:00");
        let settings = ReminderSettings::default();

        let cases = vec![
            (597, false),
            (598, true),
            (600, true),
            (602, true),
            (603, false),
        ];
        for (now, due) in cases {
            let classes = task.due_reminders(now, &settings);
            assert_eq!(
                classes.contains(&ReminderClass::OnStart),
                due,
                "now: {}",
                now
            );
        }
    }

    #[test]
    fn it_nudges_around_midpoint() {
        let task = task("10:00", "11:00");
        let settings = ReminderSettings::default();

        // Midpoint is minute 630
        let cases = vec![
            (627, false),
            (628, true),
            (630, true),
            (632, true),
            (633, false),
        ];
        for (now, due) in cases {
            let classes = task.due_reminders(now, &settings);
            assert_eq!(classes.contains(&ReminderClass::Mid), due, "now: {}", now);
        }
    }

    #[test]
    fn it_rounds_midpoint_down_for_odd_durations() {
        // Start 540, end 601, exact midpoint would be 570.5
        let task = task("09:00", "10:01");
        let settings = ReminderSettings::default();

        let classes = task.due_reminders(572, &settings);
        assert!(classes.contains(&ReminderClass::Mid));
        let classes = task.due_reminders(573, &settings);
        assert!(!classes.contains(&ReminderClass::Mid));
    }

    #[test]
    fn it_congratulates_around_end() {
        let task = task("10:00", "11:00");
        let settings = ReminderSettings::default();

        let cases = vec![
            (657, false),
            (658, true),
            (660, true),
            (662, true),
            (663, false),
        ];
        for (now, due) in cases {
            let classes = task.due_reminders(now, &settings);
            assert_eq!(classes.contains(&ReminderClass::OnEnd), due, "now: {}", now);
        }
    }

    #[test]
    fn it_skips_completed_tasks() {
        let mut task = task("10:00", "11:00");
        task.completed = true;
        let settings = ReminderSettings::default();

        for now in &[590, 600, 630, 660] {
            assert!(task.due_reminders(*now, &settings).is_empty());
        }
    }

    #[test]
    fn it_skips_disabled_classes() {
        let task = task("10:00", "11:00");
        let settings = ReminderSettings {
            remind_before: false,
            remind_on_start: true,
            nudge_mid: false,
            congratulate_on_end: true,
        };

        assert!(task.due_reminders(590, &settings).is_empty());
        assert_eq!(
            task.due_reminders(600, &settings),
            vec![ReminderClass::OnStart]
        );
        assert!(task.due_reminders(630, &settings).is_empty());
        assert_eq!(
            task.due_reminders(660, &settings),
            vec![ReminderClass::OnEnd]
        );
    }

    #[test]
    fn it_skips_already_sent_classes() {
        let mut task = task("10:00", "11:00");
        let settings = ReminderSettings::default();

        assert_eq!(
            task.due_reminders(600, &settings),
            vec![ReminderClass::OnStart]
        );
        task.sent.mark_sent(ReminderClass::OnStart);
        assert!(task.due_reminders(600, &settings).is_empty());

        // Other classes are not affected by the sent flag
        assert_eq!(task.due_reminders(630, &settings), vec![ReminderClass::Mid]);
    }

    #[test]
    fn it_reports_every_due_class_for_short_tasks() {
        // Start, midpoint and end all land on minute 600
        let task = task("10:00", "10:00");
        let settings = ReminderSettings::default();

        let classes = task.due_reminders(600, &settings);
        assert_eq!(classes.len(), 3);
        assert!(classes.contains(&ReminderClass::OnStart));
        assert!(classes.contains(&ReminderClass::Mid));
        assert!(classes.contains(&ReminderClass::OnEnd));

        let classes = task.due_reminders(590, &settings);
        assert_eq!(classes, vec![ReminderClass::Before]);
    }

    #[test]
    fn it_tolerates_tasks_that_end_before_they_start() {
        let task = task("11:00", "10:00");
        let settings = ReminderSettings::default();

        // Midpoint of 660 and 600 is 630
        assert_eq!(task.due_reminders(630, &settings), vec![ReminderClass::Mid]);
        assert_eq!(
            task.due_reminders(600, &settings),
            vec![ReminderClass::OnEnd]
        );
        assert_eq!(
            task.due_reminders(660, &settings),
            vec![ReminderClass::OnStart]
        );
    }
}
