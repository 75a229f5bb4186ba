use crate::import::workbook::{CellValue, SheetRow};

/// Column positions of the objectives sheet, 0-indexed.
mod column {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const DEPTH: usize = 2;
    pub const LEVELS: usize = 3;
    pub const ACTIVITY: usize = 6;
    pub const SUBJECTS: usize = 7;
    pub const SUBJECT_RELATED: usize = 9;
    pub const SYMPTOM: usize = 10;
    pub const COMPETENCE: usize = 11;
    pub const SYSTEMS: usize = 12;
    pub const PUBLIC: usize = 14;
    pub const UFIDS: usize = 15;
    pub const STUDY_FIELD: usize = 16;
}

/// A row of the objectives sheet with its cells named. Skill rows reuse the level column
/// for their competence level acronym, so `levels` doubles as that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectiveRow {
    pub id: Option<i32>,
    pub name: String,
    pub depth: CellValue,
    pub levels: CellValue,
    pub activity: CellValue,
    pub subjects: CellValue,
    pub subject_related: CellValue,
    pub symptom_flag: CellValue,
    pub competence_flag: CellValue,
    pub systems: CellValue,
    pub public: CellValue,
    pub ufids: CellValue,
    pub study_field: CellValue,
}

impl ObjectiveRow {
    pub fn decode(row: &SheetRow) -> Self {
        Self {
            id: row.cell(column::ID).as_id(),
            name: row.cell(column::NAME).as_text().unwrap_or_default(),
            depth: row.cell(column::DEPTH).clone(),
            levels: row.cell(column::LEVELS).clone(),
            activity: row.cell(column::ACTIVITY).clone(),
            subjects: row.cell(column::SUBJECTS).clone(),
            subject_related: row.cell(column::SUBJECT_RELATED).clone(),
            symptom_flag: row.cell(column::SYMPTOM).clone(),
            competence_flag: row.cell(column::COMPETENCE).clone(),
            systems: row.cell(column::SYSTEMS).clone(),
            public: row.cell(column::PUBLIC).clone(),
            ufids: row.cell(column::UFIDS).clone(),
            study_field: row.cell(column::STUDY_FIELD).clone(),
        }
    }

    /// The competence level acronym of a skill row.
    pub fn competence_level(&self) -> Option<String> {
        self.levels.as_text().map(|acronym| acronym.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn decode_maps_fixed_columns() {
        let mut cells = vec![CellValue::Empty; 17];
        cells[0] = CellValue::Number(7.0);
        cells[1] = text("Take a history");
        cells[2] = CellValue::Number(2.0);
        cells[3] = text("int, sur");
        cells[6] = text("Anamnesis");
        cells[7] = text("AM");
        cells[9] = text("ja");
        cells[10] = text("nein");
        cells[11] = CellValue::Number(0.0);
        cells[12] = text("CV");
        cells[14] = text("ja");
        cells[15] = CellValue::Number(12345.0);
        cells[16] = text("hm");
        let row = ObjectiveRow::decode(&SheetRow::new(cells));

        assert_eq!(row.id, Some(7));
        assert_eq!(row.name, "Take a history");
        assert_eq!(row.depth, CellValue::Number(2.0));
        assert_eq!(row.levels, text("int, sur"));
        assert_eq!(row.activity, text("Anamnesis"));
        assert_eq!(row.subjects, text("AM"));
        assert_eq!(row.subject_related, text("ja"));
        assert_eq!(row.symptom_flag, text("nein"));
        assert_eq!(row.competence_flag, CellValue::Number(0.0));
        assert_eq!(row.systems, text("CV"));
        assert_eq!(row.public, text("ja"));
        assert_eq!(row.ufids, CellValue::Number(12345.0));
        assert_eq!(row.study_field, text("hm"));
    }

    #[test]
    fn decode_short_row_leaves_trailing_fields_empty() {
        let row = ObjectiveRow::decode(&SheetRow::new(vec![
            CellValue::Number(3.0),
            text("Short row"),
        ]));
        assert_eq!(row.id, Some(3));
        assert!(row.study_field.is_empty());
        assert!(row.ufids.is_empty());
        assert_eq!(row.competence_level(), None);
    }

    #[test]
    fn decode_without_numeric_id() {
        let row = ObjectiveRow::decode(&SheetRow::new(vec![text("n/a"), text("Heading")]));
        assert_eq!(row.id, None);
    }
}
