use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Level {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Subject {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum System {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum StudyField {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Ufid {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum CompetenceLevel {
    Table,
    Id,
    Name,
    Short,
    Description,
    Position,
}

#[derive(DeriveIden)]
enum Activity {
    Table,
    Id,
    Name,
    CompetenceLevelId,
}

#[derive(DeriveIden)]
enum Ability {
    Table,
    Id,
    Name,
    Depth,
    SubjectRelated,
    Public,
    StudyFieldId,
}

#[derive(DeriveIden)]
enum Skill {
    Table,
    Id,
    Name,
    ActivityId,
}

#[derive(DeriveIden)]
enum Symptom {
    Table,
    Id,
    Name,
    Public,
}

/// Acronym keyed lookup tables all share the same shape.
fn acronym_table<T: IntoIden + 'static>(table: T, id: T, name: T) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(id).string_len(128).not_null().primary_key())
        .col(ColumnDef::new(name).string_len(512).not_null())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(acronym_table(Level::Table, Level::Id, Level::Name))
            .await?;
        manager
            .create_table(acronym_table(Subject::Table, Subject::Id, Subject::Name))
            .await?;
        manager
            .create_table(acronym_table(System::Table, System::Id, System::Name))
            .await?;
        manager
            .create_table(acronym_table(
                StudyField::Table,
                StudyField::Id,
                StudyField::Name,
            ))
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Ufid::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ufid::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Ufid::Name).string_len(512).not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(CompetenceLevel::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompetenceLevel::Id)
                            .string_len(128)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CompetenceLevel::Name)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompetenceLevel::Short)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompetenceLevel::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CompetenceLevel::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activity::Id)
                            .integer()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Activity::Name)
                            .string_len(512)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Activity::CompetenceLevelId)
                            .string_len(128)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_competence_level")
                            .from(Activity::Table, Activity::CompetenceLevelId)
                            .to(CompetenceLevel::Table, CompetenceLevel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Ability::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ability::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Ability::Name).string_len(512).not_null())
                    .col(ColumnDef::new(Ability::Depth).small_integer().null())
                    .col(ColumnDef::new(Ability::SubjectRelated).boolean().not_null())
                    .col(
                        ColumnDef::new(Ability::Public)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Ability::StudyFieldId).string_len(128).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ability_study_field")
                            .from(Ability::Table, Ability::StudyFieldId)
                            .to(StudyField::Table, StudyField::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Skill::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Skill::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Skill::Name).string_len(512).not_null())
                    .col(ColumnDef::new(Skill::ActivityId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_skill_activity")
                            .from(Skill::Table, Skill::ActivityId)
                            .to(Activity::Table, Activity::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Symptom::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Symptom::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Symptom::Name).string_len(512).not_null())
                    .col(
                        ColumnDef::new(Symptom::Public)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Symptom::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Skill::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ability::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Activity::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CompetenceLevel::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ufid::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudyField::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(System::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Level::Table).to_owned())
            .await?;
        Ok(())
    }
}
