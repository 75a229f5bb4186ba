use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Ability {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Symptom {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Level {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Subject {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum System {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Ufid {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum AbilityLevel {
    Table,
    Id,
    AbilityId,
    LevelId,
}

#[derive(DeriveIden)]
enum AbilitySubject {
    Table,
    Id,
    AbilityId,
    SubjectId,
}

#[derive(DeriveIden)]
enum AbilitySystem {
    Table,
    Id,
    AbilityId,
    SystemId,
}

#[derive(DeriveIden)]
enum AbilityUfid {
    Table,
    Id,
    AbilityId,
    UfidId,
}

#[derive(DeriveIden)]
enum SymptomSubject {
    Table,
    Id,
    SymptomId,
    SubjectId,
}

// association rows carry a surrogate key and no uniqueness constraint: imports may append
// the same pair more than once
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AbilityLevel::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AbilityLevel::Id)
                            .integer()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AbilityLevel::AbilityId).integer().not_null())
                    .col(
                        ColumnDef::new(AbilityLevel::LevelId)
                            .string_len(128)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ability_level_ability")
                            .from(AbilityLevel::Table, AbilityLevel::AbilityId)
                            .to(Ability::Table, Ability::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ability_level_level")
                            .from(AbilityLevel::Table, AbilityLevel::LevelId)
                            .to(Level::Table, Level::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(AbilitySubject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AbilitySubject::Id)
                            .integer()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AbilitySubject::AbilityId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AbilitySubject::SubjectId)
                            .string_len(128)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ability_subject_ability")
                            .from(AbilitySubject::Table, AbilitySubject::AbilityId)
                            .to(Ability::Table, Ability::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ability_subject_subject")
                            .from(AbilitySubject::Table, AbilitySubject::SubjectId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(AbilitySystem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AbilitySystem::Id)
                            .integer()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AbilitySystem::AbilityId).integer().not_null())
                    .col(
                        ColumnDef::new(AbilitySystem::SystemId)
                            .string_len(128)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ability_system_ability")
                            .from(AbilitySystem::Table, AbilitySystem::AbilityId)
                            .to(Ability::Table, Ability::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ability_system_system")
                            .from(AbilitySystem::Table, AbilitySystem::SystemId)
                            .to(System::Table, System::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(AbilityUfid::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AbilityUfid::Id)
                            .integer()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AbilityUfid::AbilityId).integer().not_null())
                    .col(ColumnDef::new(AbilityUfid::UfidId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ability_ufid_ability")
                            .from(AbilityUfid::Table, AbilityUfid::AbilityId)
                            .to(Ability::Table, Ability::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ability_ufid_ufid")
                            .from(AbilityUfid::Table, AbilityUfid::UfidId)
                            .to(Ufid::Table, Ufid::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(SymptomSubject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SymptomSubject::Id)
                            .integer()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SymptomSubject::SymptomId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SymptomSubject::SubjectId)
                            .string_len(128)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_symptom_subject_symptom")
                            .from(SymptomSubject::Table, SymptomSubject::SymptomId)
                            .to(Symptom::Table, Symptom::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_symptom_subject_subject")
                            .from(SymptomSubject::Table, SymptomSubject::SubjectId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();
        db.execute_unprepared(
            r#"
            CREATE INDEX ability_level_ability_idx ON ability_level (ability_id);
            CREATE INDEX ability_subject_ability_idx ON ability_subject (ability_id);
            CREATE INDEX ability_subject_subject_idx ON ability_subject (subject_id);
            CREATE INDEX ability_system_ability_idx ON ability_system (ability_id);
            CREATE INDEX ability_ufid_ability_idx ON ability_ufid (ability_id);
            CREATE INDEX symptom_subject_symptom_idx ON symptom_subject (symptom_id);
            CREATE INDEX symptom_subject_subject_idx ON symptom_subject (subject_id);
        "#,
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SymptomSubject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AbilityUfid::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AbilitySystem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AbilitySubject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AbilityLevel::Table).to_owned())
            .await?;
        Ok(())
    }
}
