use poem_openapi::Object;

use crate::types::db::{bus_break_down_log, bus_fire_log, bus_on_off_log};
use crate::types::internal::{DailyCountRow, SensorRow, SensorSlotRow};

/// Number of events on one day, optionally per bus model or group
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct DailyCountView {
    pub dimension: Option<String>,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub count: i64,
}

impl From<DailyCountRow> for DailyCountView {
    fn from(row: DailyCountRow) -> Self {
        Self {
            dimension: row.dimension,
            year: row.log_year,
            month: row.log_month,
            day: row.log_day,
            count: row.ct,
        }
    }
}

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct OnOffLogView {
    pub id: i32,
    pub vin: String,
    pub group_id: Option<i32>,
    pub log_year: i32,
    pub log_month: i32,
    pub log_day: i32,
    pub log_time: i64,
    pub online: bool,
}

impl From<bus_on_off_log::Model> for OnOffLogView {
    fn from(m: bus_on_off_log::Model) -> Self {
        Self {
            id: m.id,
            vin: m.vin,
            group_id: m.group_id,
            log_year: m.log_year,
            log_month: m.log_month,
            log_day: m.log_day,
            log_time: m.log_time,
            online: m.online,
        }
    }
}

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct FireLogView {
    pub id: i32,
    pub vin: String,
    pub group_id: Option<i32>,
    pub log_year: i32,
    pub log_month: i32,
    pub log_day: i32,
    pub log_time: i64,
    pub fire_level: i32,
}

impl From<bus_fire_log::Model> for FireLogView {
    fn from(m: bus_fire_log::Model) -> Self {
        Self {
            id: m.id,
            vin: m.vin,
            group_id: m.group_id,
            log_year: m.log_year,
            log_month: m.log_month,
            log_day: m.log_day,
            log_time: m.log_time,
            fire_level: m.fire_level,
        }
    }
}

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct BreakDownLogView {
    pub id: i32,
    pub vin: String,
    pub group_id: Option<i32>,
    pub log_year: i32,
    pub log_month: i32,
    pub log_day: i32,
    pub log_time: i64,
    pub fault_code: Option<String>,
    pub fault_desc: Option<String>,
}

impl From<bus_break_down_log::Model> for BreakDownLogView {
    fn from(m: bus_break_down_log::Model) -> Self {
        Self {
            id: m.id,
            vin: m.vin,
            group_id: m.group_id,
            log_year: m.log_year,
            log_month: m.log_month,
            log_day: m.log_day,
            log_time: m.log_time,
            fault_code: m.fault_code,
            fault_desc: m.fault_desc,
        }
    }
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct OnOffLogPage {
    pub items: Vec<OnOffLogView>,
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct FireLogPage {
    pub items: Vec<FireLogView>,
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct BreakDownLogPage {
    pub items: Vec<BreakDownLogView>,
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Object, Debug, Clone, PartialEq)]
pub struct SensorSlotView {
    /// 1-based position in the sensor array
    pub index: u32,
    pub sn: Option<String>,
    pub temp: Option<String>,
    pub concen: Option<String>,
    pub fire: Option<String>,
    pub error: Option<String>,
    pub state: Option<String>,
}

/// One vehicle upload with its first six sensors
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct SensorReadingView {
    pub vin: String,
    /// Upload time (ISO 8601, no zone)
    pub upload_time: String,
    /// Length of the sensor array
    pub ct: Option<i32>,
    pub is_fire: Option<String>,
    pub is_error: Option<String>,
    pub sensors: Vec<SensorSlotView>,
}

impl From<SensorRow> for SensorReadingView {
    fn from(row: SensorRow) -> Self {
        Self {
            vin: row.vin,
            upload_time: row.upload_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ct: row.ct,
            is_fire: row.is_fire,
            is_error: row.is_error,
            sensors: row
                .slots
                .into_iter()
                .enumerate()
                .map(|(i, slot)| SensorSlotView::new(i as u32 + 1, slot))
                .collect(),
        }
    }
}

impl SensorSlotView {
    fn new(index: u32, slot: SensorSlotRow) -> Self {
        Self {
            index,
            sn: slot.sn,
            temp: slot.temp,
            concen: slot.concen,
            fire: slot.fire,
            error: slot.error,
            state: slot.state,
        }
    }
}
