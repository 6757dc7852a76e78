//! Monitoring domain entities
//!
//! A four-level containment tree: projects hold groups, groups hold points,
//! and points produce readings. Parents are referenced through integer
//! foreign keys, and some records also keep denormalised comma-separated
//! ID lists of their children.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::DomainError;

/// Shared behaviour of monitoring records
pub trait MonitoringRecord: Clone + Send + Sync + 'static {
    /// Name used in messages, e.g. "MonProject"
    const LABEL: &'static str;

    /// Shape returned to clients
    type View: Serialize + Send + 'static;

    fn id(&self) -> i32;

    fn set_id(&mut self, id: i32);

    /// Overwrite fields that are present in `patch`, keep the rest
    fn merge(&mut self, patch: Self);

    fn into_view(self) -> Self::View;
}

macro_rules! merge_present {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if $patch.$field.is_some() {
                $target.$field = $patch.$field;
            }
        )+
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MonProject {
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub mon_project_type: Option<i32>,
    #[serde(rename = "RefObjID")]
    pub ref_obj_id: Option<i32>,
    #[serde(rename = "MonGroupIDs")]
    pub mon_group_ids: Option<String>,
    #[serde(rename = "CompanyInfoID")]
    pub company_info_id: Option<i32>,
    #[serde(rename = "PerInfoID")]
    pub per_info_id: Option<i32>,
    #[serde(rename = "MonInstInfoIDs")]
    pub mon_inst_info_ids: Option<String>,
    #[serde(rename = "FileIDs")]
    pub file_ids: Option<String>,
    pub remark: Option<String>,
}

impl MonitoringRecord for MonProject {
    const LABEL: &'static str = "MonProject";
    type View = Self;

    fn into_view(self) -> Self {
        self
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn merge(&mut self, patch: Self) {
        merge_present!(
            self,
            patch,
            name,
            description,
            mon_project_type,
            ref_obj_id,
            mon_group_ids,
            company_info_id,
            per_info_id,
            mon_inst_info_ids,
            file_ids,
            remark,
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MonGroup {
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub mon_group_type: Option<i32>,
    #[serde(rename = "MonProjectID")]
    pub mon_project_id: Option<i32>,
    #[serde(rename = "RefObjID")]
    pub ref_obj_id: Option<i32>,
    #[serde(rename = "MonPointIDs")]
    pub mon_point_ids: Option<String>,
    pub ref_specifications: Option<String>,
    #[serde(rename = "PerInfoID")]
    pub per_info_id: Option<i32>,
    #[serde(rename = "FileIDs")]
    pub file_ids: Option<String>,
    pub remark: Option<String>,
}

impl MonitoringRecord for MonGroup {
    const LABEL: &'static str = "MonGroup";
    type View = Self;

    fn into_view(self) -> Self {
        self
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn merge(&mut self, patch: Self) {
        merge_present!(
            self,
            patch,
            name,
            description,
            mon_group_type,
            mon_project_id,
            ref_obj_id,
            mon_point_ids,
            ref_specifications,
            per_info_id,
            file_ids,
            remark,
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MonPoint {
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub mon_point_type: Option<i32>,
    #[serde(rename = "MonGroupID")]
    pub mon_group_id: Option<i32>,
    #[serde(rename = "DACID")]
    pub dac_id: Option<i32>,
    pub sensor_name: Option<String>,
    /// Comma-separated component names
    pub component: Option<String>,
    pub unit: Option<String>,
    pub x_coordinate: Option<Decimal>,
    pub y_coordinate: Option<Decimal>,
    pub z_coordinate: Option<Decimal>,
    pub ini_value: Option<Decimal>,
    pub s_time: Option<NaiveDateTime>,
    #[serde(rename = "PerInfoID")]
    pub per_info_id: Option<i32>,
    #[serde(rename = "FileIDs")]
    pub file_ids: Option<String>,
    pub remark: Option<String>,
}

impl MonPoint {
    /// Components measured at this point
    pub fn component_list(&self) -> Vec<String> {
        match &self.component {
            Some(component) => component.split(',').map(str::to_string).collect(),
            None => Vec::new(),
        }
    }
}

/// A point with `Component` also split into `ComponentList`
#[derive(Debug, Clone, Serialize)]
pub struct MonPointView {
    #[serde(flatten)]
    pub point: MonPoint,
    #[serde(rename = "ComponentList")]
    pub component_list: Vec<String>,
}

impl From<MonPoint> for MonPointView {
    fn from(point: MonPoint) -> Self {
        Self {
            component_list: point.component_list(),
            point,
        }
    }
}

impl MonitoringRecord for MonPoint {
    const LABEL: &'static str = "MonPoint";
    type View = MonPointView;

    fn into_view(self) -> MonPointView {
        MonPointView::from(self)
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn merge(&mut self, patch: Self) {
        merge_present!(
            self,
            patch,
            name,
            description,
            mon_point_type,
            mon_group_id,
            dac_id,
            sensor_name,
            component,
            unit,
            x_coordinate,
            y_coordinate,
            z_coordinate,
            ini_value,
            s_time,
            per_info_id,
            file_ids,
            remark,
        );
    }
}

/// A single reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MonData {
    #[serde(rename = "ID")]
    pub id: i32,
    pub sensor_name: Option<String>,
    pub part: Option<String>,
    pub acq_time: Option<NaiveDateTime>,
    pub rec_time: Option<NaiveDateTime>,
    pub value: Option<Decimal>,
    pub data: Option<Decimal>,
    pub curr_variation: Option<Decimal>,
    pub accu_variation: Option<Decimal>,
    pub variation_rate: Option<Decimal>,
    pub value_per_design: Option<Decimal>,
    pub remark: Option<String>,
}

impl MonitoringRecord for MonData {
    const LABEL: &'static str = "MonData";
    type View = Self;

    fn into_view(self) -> Self {
        self
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn merge(&mut self, patch: Self) {
        merge_present!(
            self,
            patch,
            sensor_name,
            part,
            acq_time,
            rec_time,
            value,
            data,
            curr_variation,
            accu_variation,
            variation_rate,
            value_per_design,
            remark,
        );
    }
}

/// A group with the points that reference it
#[derive(Debug, Clone, Serialize)]
pub struct MonGroupTree {
    #[serde(flatten)]
    pub group: MonGroup,
    #[serde(rename = "MonPoints", serialize_with = "serialize_point_views")]
    pub points: Vec<MonPoint>,
}

fn serialize_point_views<S: Serializer>(points: &[MonPoint], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(points.iter().cloned().map(MonPointView::from))
}

/// A project with its groups and their points
#[derive(Debug, Clone, Serialize)]
pub struct MonProjectTree {
    #[serde(flatten)]
    pub project: MonProject,
    #[serde(rename = "MonGroups")]
    pub groups: Vec<MonGroupTree>,
}

/// Parse a denormalised ID list such as `"1,2, 3"`
///
/// Blank entries are skipped.
pub fn parse_id_list(list: Option<&str>) -> Result<Vec<i32>, DomainError> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };

    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| DomainError::Validation(format!("Invalid ID in list: {}", s)))
        })
        .collect()
}
