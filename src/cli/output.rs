use serde::Serialize;

use crate::layout::OverlapInfo;
use crate::model::{Category, TimeBlock, Todo};
use crate::ops::stats::CategoryTotal;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct BlockJson {
    pub id: String,
    pub category: String,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub column_index: usize,
    pub total_columns: usize,
}

impl BlockJson {
    pub fn new(block: &TimeBlock, info: OverlapInfo) -> Self {
        BlockJson {
            id: block.id.clone(),
            category: block.category_id.clone(),
            start: block.start_hour,
            end: block.end_hour(),
            duration: block.duration,
            memo: block.memo.clone(),
            column_index: info.column_index,
            total_columns: info.total_columns,
        }
    }
}

#[derive(Serialize)]
pub struct DayJson {
    pub date: String,
    pub tracked_hours: f64,
    pub blocks: Vec<BlockJson>,
}

#[derive(Serialize)]
pub struct CategoryJson {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl From<&Category> for CategoryJson {
    fn from(c: &Category) -> Self {
        CategoryJson {
            id: c.id.clone(),
            name: c.name.clone(),
            icon: c.icon.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct StatsJson {
    pub from: String,
    pub to: String,
    pub tracked_hours: f64,
    pub totals: Vec<CategoryTotalJson>,
}

#[derive(Serialize)]
pub struct CategoryTotalJson {
    pub category: String,
    pub hours: f64,
    pub share: f64,
    pub blocks: usize,
}

impl From<&CategoryTotal> for CategoryTotalJson {
    fn from(t: &CategoryTotal) -> Self {
        CategoryTotalJson {
            category: t.category_id.clone(),
            hours: t.hours,
            share: t.share,
            blocks: t.blocks,
        }
    }
}

#[derive(Serialize)]
pub struct TodoJson {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub done: bool,
    pub added: String,
}

impl From<&Todo> for TodoJson {
    fn from(t: &Todo) -> Self {
        TodoJson {
            id: t.id.clone(),
            title: t.title.clone(),
            category: t.category_id.clone(),
            done: t.done,
            added: t.added.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub kind: String,
    pub id: String,
    pub text: String,
}
