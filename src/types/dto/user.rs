use poem_openapi::{Enum, Object};
use sea_orm::ActiveEnum;

use crate::types::db::{group, role, user, Sex, Status};
use crate::types::dto::common::EnumOption;

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[oai(rename_all = "UPPERCASE")]
pub enum StatusDto {
    Enable,
    Disable,
}

impl From<Status> for StatusDto {
    fn from(status: Status) -> Self {
        match status {
            Status::Enable => StatusDto::Enable,
            Status::Disable => StatusDto::Disable,
        }
    }
}

impl From<StatusDto> for Status {
    fn from(status: StatusDto) -> Self {
        match status {
            StatusDto::Enable => Status::Enable,
            StatusDto::Disable => Status::Disable,
        }
    }
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SexDto {
    M,
    F,
}

impl From<Sex> for SexDto {
    fn from(sex: Sex) -> Self {
        match sex {
            Sex::M => SexDto::M,
            Sex::F => SexDto::F,
        }
    }
}

impl From<SexDto> for Sex {
    fn from(sex: SexDto) -> Self {
        match sex {
            SexDto::M => Sex::M,
            SexDto::F => Sex::F,
        }
    }
}

/// User create/update form submitted to `saveUser`
///
/// Without `id` a new user is created; `password` falls back to the default
/// password. A non-empty `roleIds` replaces the user's roles.
#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct UserForm {
    pub id: Option<i32>,
    pub login_name: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub sex: Option<SexDto>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub tel: Option<String>,
    pub status: Option<StatusDto>,
    pub group_id: Option<i32>,
    pub role_ids: Option<Vec<i32>>,
}

/// Profile fields editable through `update`
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct UserUpdateForm {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub sex: Option<SexDto>,
    pub status: Option<StatusDto>,
    pub group_id: Option<i32>,
    pub mobile: Option<String>,
    pub tel: Option<String>,
    pub role_ids: Option<Vec<i32>>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct SaveRolesRequest {
    pub id: i32,
    /// Absent grants nothing
    pub role_ids: Option<Vec<i32>>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub id: i32,
    pub new_password: String,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct LoginNameRequest {
    pub login_name: String,
}

/// User as shown to administrators (never carries the password hash)
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct UserView {
    pub id: i32,
    pub login_name: String,
    pub name: Option<String>,
    pub sex: SexDto,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub tel: Option<String>,
    pub status: StatusDto,
    pub group_id: Option<i32>,
    pub group_name: Option<String>,
    pub role_ids: Vec<i32>,
    /// Role codes joined by `,` with a trailing comma
    pub role_names: String,
    pub super_admin: bool,
    pub create_time: i64,
    pub update_time: i64,
}

impl UserView {
    pub fn from_model(user: user::Model, roles: &[role::Model], group: Option<&group::Model>) -> Self {
        Self {
            super_admin: user.is_super_admin(),
            role_ids: roles.iter().map(|r| r.id).collect(),
            role_names: join_role_codes(roles),
            group_name: group.map(|g| g.name.clone()),
            id: user.id,
            login_name: user.login_name,
            name: user.name,
            sex: user.sex.into(),
            email: user.email,
            mobile: user.mobile,
            tel: user.tel,
            status: user.status.into(),
            group_id: user.group_id,
            create_time: user.create_time,
            update_time: user.update_time,
        }
    }
}

/// Role codes joined by `,`, each followed by a comma
pub fn join_role_codes(roles: &[role::Model]) -> String {
    roles.iter().map(|r| format!("{},", r.code)).collect()
}

#[derive(Object, Debug, Clone, PartialEq)]
pub struct RoleView {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub enabled: bool,
}

impl From<role::Model> for RoleView {
    fn from(role: role::Model) -> Self {
        Self {
            id: role.id,
            code: role.code,
            name: role.name,
            enabled: role.enabled,
        }
    }
}

#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct GroupView {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub status: StatusDto,
    pub sort_order: i32,
}

impl From<group::Model> for GroupView {
    fn from(group: group::Model) -> Self {
        Self {
            id: group.id,
            name: group.name,
            parent_id: group.parent_id,
            status: group.status.into(),
            sort_order: group.sort_order,
        }
    }
}

/// Model behind the add and edit user forms
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct UserFormModel {
    /// Present on the edit form
    pub user: Option<UserView>,
    /// Enabled roles
    pub roles: Vec<RoleView>,
    pub status_options: Vec<EnumOption>,
    pub sex_options: Vec<EnumOption>,
    /// Group the new user is created under, when one was requested
    pub parent_group: Option<GroupView>,
    pub groups: Vec<GroupView>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct AddRolesFormModel {
    pub user: UserView,
    /// Enabled roles the user does not hold yet
    pub available_roles: Vec<RoleView>,
}

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct UserPage {
    pub items: Vec<UserView>,
    /// Zero-based page index
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
}

pub fn status_options() -> Vec<EnumOption> {
    [Status::Enable, Status::Disable]
        .into_iter()
        .map(|s| EnumOption {
            value: s.name().to_string(),
            label: s.label().to_string(),
        })
        .collect()
}

pub fn sex_options() -> Vec<EnumOption> {
    [Sex::M, Sex::F]
        .into_iter()
        .map(|s| EnumOption {
            value: s.to_value(),
            label: s.label().to_string(),
        })
        .collect()
}
