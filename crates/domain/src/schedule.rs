use crate::{
    date::Day,
    shared::entity::{Entity, ID},
};

/// One user's plan for a single calendar date. The task blocks are stored
/// separately and point back here through their `schedule_id`.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub id: ID,
    pub user_id: ID,
    pub date: Day,
    pub created: i64,
    pub updated: i64,
}

impl DaySchedule {
    pub fn new(user_id: ID, date: Day, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            date,
            created: now,
            updated: now,
        }
    }
}

impl Entity<ID> for DaySchedule {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
