use chrono::NaiveDateTime;
use sea_orm::{DbErr, FromQueryResult, QueryResult};

/// Sensors unpivoted per reading
pub const SENSOR_SLOTS: usize = 6;

/// `[dimension?, year, month, day, count]` row of a daily count report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCountRow {
    /// Bus model or group name; absent for overall counts
    pub dimension: Option<String>,
    pub log_year: i32,
    pub log_month: i32,
    pub log_day: i32,
    pub ct: i64,
}

impl DailyCountRow {
    /// Decode one report row
    ///
    /// `with_dimension` must match whether the statement selected a
    /// `dimension` column; overall counts select none.
    pub fn from_result(res: &QueryResult, with_dimension: bool) -> Result<Self, DbErr> {
        let dimension = if with_dimension {
            res.try_get::<Option<String>>("", "dimension")?
        } else {
            None
        };

        Ok(Self {
            dimension,
            log_year: res.try_get("", "log_year")?,
            log_month: res.try_get("", "log_month")?,
            log_day: res.try_get("", "log_day")?,
            ct: res.try_get("", "ct")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorSlotRow {
    pub sn: Option<String>,
    pub temp: Option<String>,
    pub concen: Option<String>,
    pub fire: Option<String>,
    pub error: Option<String>,
    pub state: Option<String>,
}

/// One upload with its sensor array flattened into `sn1..state6` columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorRow {
    pub vin: String,
    pub upload_time: NaiveDateTime,
    pub ct: Option<i32>,
    pub is_fire: Option<String>,
    pub is_error: Option<String>,
    pub slots: Vec<SensorSlotRow>,
}

impl FromQueryResult for SensorRow {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        let mut slots = Vec::with_capacity(SENSOR_SLOTS);
        for i in 1..=SENSOR_SLOTS {
            slots.push(SensorSlotRow {
                sn: res.try_get(pre, &format!("sn{}", i))?,
                temp: res.try_get(pre, &format!("temp{}", i))?,
                concen: res.try_get(pre, &format!("concen{}", i))?,
                fire: res.try_get(pre, &format!("fire{}", i))?,
                error: res.try_get(pre, &format!("error{}", i))?,
                state: res.try_get(pre, &format!("state{}", i))?,
            });
        }

        Ok(Self {
            vin: res.try_get(pre, "vin")?,
            upload_time: res.try_get(pre, "upload_time")?,
            ct: res.try_get(pre, "ct")?,
            is_fire: res.try_get(pre, "isfire")?,
            is_error: res.try_get(pre, "iserror")?,
            slots,
        })
    }
}
