use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Organisation tree (bus operator -> branch -> route)
        manager
            .create_table(
                Table::create()
                    .table(SysGroup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SysGroup::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SysGroup::Name).string_len(50).not_null())
                    .col(ColumnDef::new(SysGroup::ParentId).integer().null())
                    .col(
                        ColumnDef::new(SysGroup::Status)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SysGroup::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SysGroup::CreateTime).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sys_group_parent_id")
                            .from(SysGroup::Table, SysGroup::ParentId)
                            .to(SysGroup::Table, SysGroup::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sys_group_parent_id")
                    .table(SysGroup::Table)
                    .col(SysGroup::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SysRole::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SysRole::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SysRole::Code)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SysRole::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(SysRole::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(SysRole::Permissions).text().null())
                    .col(ColumnDef::new(SysRole::CreateTime).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SysUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SysUser::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SysUser::LoginName)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SysUser::Name).string_len(20).null())
                    .col(ColumnDef::new(SysUser::Password).string().not_null())
                    .col(ColumnDef::new(SysUser::Salt).string().null())
                    .col(
                        ColumnDef::new(SysUser::Sex)
                            .string_len(1)
                            .not_null()
                            .default("M"),
                    )
                    .col(ColumnDef::new(SysUser::Email).string_len(50).null())
                    .col(ColumnDef::new(SysUser::Mobile).string_len(11).null())
                    .col(ColumnDef::new(SysUser::Tel).string_len(15).null())
                    .col(
                        ColumnDef::new(SysUser::Status)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SysUser::GroupId).integer().null())
                    .col(ColumnDef::new(SysUser::CreateTime).big_integer().not_null())
                    .col(ColumnDef::new(SysUser::UpdateTime).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sys_user_group_id")
                            .from(SysUser::Table, SysUser::GroupId)
                            .to(SysGroup::Table, SysGroup::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SysUserRole::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SysUserRole::UserId).integer().not_null())
                    .col(ColumnDef::new(SysUserRole::RoleId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(SysUserRole::UserId)
                            .col(SysUserRole::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sys_user_role_user_id")
                            .from(SysUserRole::Table, SysUserRole::UserId)
                            .to(SysUser::Table, SysUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sys_user_role_role_id")
                            .from(SysUserRole::Table, SysUserRole::RoleId)
                            .to(SysRole::Table, SysRole::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SysGroupRole::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SysGroupRole::GroupId).integer().not_null())
                    .col(ColumnDef::new(SysGroupRole::RoleId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(SysGroupRole::GroupId)
                            .col(SysGroupRole::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sys_group_role_group_id")
                            .from(SysGroupRole::Table, SysGroupRole::GroupId)
                            .to(SysGroup::Table, SysGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sys_group_role_role_id")
                            .from(SysGroupRole::Table, SysGroupRole::RoleId)
                            .to(SysRole::Table, SysRole::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SysGroupRole::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SysUserRole::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SysUser::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SysRole::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SysGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SysGroup {
    Table,
    Id,
    Name,
    ParentId,
    Status,
    SortOrder,
    CreateTime,
}

#[derive(DeriveIden)]
enum SysRole {
    Table,
    Id,
    Code,
    Name,
    Enabled,
    Permissions,
    CreateTime,
}

#[derive(DeriveIden)]
enum SysUser {
    Table,
    Id,
    LoginName,
    Name,
    Password,
    Salt,
    Sex,
    Email,
    Mobile,
    Tel,
    Status,
    GroupId,
    CreateTime,
    UpdateTime,
}

#[derive(DeriveIden)]
enum SysUserRole {
    Table,
    UserId,
    RoleId,
}

#[derive(DeriveIden)]
enum SysGroupRole {
    Table,
    GroupId,
    RoleId,
}
