mod columns;

use crate::builder::DatasetBuilder;
use crate::csv_parser::{CsvParser, CsvTable};
use crate::tags::sanitize_tags;
use crate::ExtractionError;
use coursework_core::load_dataset;
use shared_types::{Project, ProjectData};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Outcome of merging an export into a dataset
#[derive(Debug)]
pub struct ImportReport {
    pub data: ProjectData,
    pub added: usize,
    pub skipped: usize,
}

pub struct ProjectsCsvExtractor {
    csv_parser: CsvParser,
}

impl ProjectsCsvExtractor {
    pub fn new() -> Self {
        Self {
            csv_parser: CsvParser::with_delimiter(b';'),
        }
    }

    /// Projects described by the export, in row order. Rows without a
    /// Russian title are left out but still consume their index.
    pub fn extract_projects(&self, content: &[u8]) -> Result<Vec<Project>, ExtractionError> {
        let table = self.csv_parser.parse_table(content)?;

        if table.column(columns::TITLE_RU).is_none() {
            return Err(ExtractionError::InvalidInput(format!(
                "Missing column: {}",
                columns::TITLE_RU
            )));
        }

        let course_columns: Vec<&str> = table
            .headers
            .iter()
            .filter(|h| h.to_lowercase().contains(columns::COURSE_MARKER))
            .map(String::as_str)
            .collect();

        let projects = table
            .rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let row = row.as_ref()?;
                let project = project_from_row(&table, row, index, &course_columns);
                if project.is_none() {
                    debug!("Skipping row {} without a title", index);
                }
                project
            })
            .collect();

        Ok(projects)
    }

    /// Merge the export into `existing`, skipping projects it already holds
    pub fn import(
        &self,
        content: &[u8],
        existing: Option<ProjectData>,
    ) -> Result<ImportReport, ExtractionError> {
        let mut builder = match existing {
            Some(data) => DatasetBuilder::from_existing(data),
            None => DatasetBuilder::new(),
        };

        let mut added = 0;
        let mut skipped = 0;
        for project in self.extract_projects(content)? {
            if builder.add_project(project) {
                added += 1;
            } else {
                skipped += 1;
            }
        }

        Ok(ImportReport {
            data: builder.build(),
            added,
            skipped,
        })
    }

    /// Import `csv_path` into the dataset at `output_path`, resuming from
    /// its current contents when the file exists
    pub fn import_file(
        &self,
        csv_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<ImportReport, ExtractionError> {
        let csv_path = csv_path.as_ref();
        let output_path = output_path.as_ref();

        if !csv_path.exists() {
            return Err(ExtractionError::InvalidInput(format!(
                "CSV file does not exist: {}",
                csv_path.display()
            )));
        }

        let content = fs::read(csv_path)?;
        let existing = if output_path.exists() {
            let data = load_dataset(output_path)?;
            info!(
                "Resuming from {} existing projects in {}",
                data.projects.len(),
                output_path.display()
            );
            Some(data)
        } else {
            None
        };

        let report = self.import(&content, existing)?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, serde_json::to_string_pretty(&report.data)?)?;

        info!(
            "Wrote {} projects ({} new, {} already present) to {}",
            report.data.metadata.total_projects,
            report.added,
            report.skipped,
            output_path.display()
        );
        Ok(report)
    }
}

impl Default for ProjectsCsvExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn project_from_row(
    table: &CsvTable,
    row: &[String],
    index: usize,
    course_columns: &[&str],
) -> Option<Project> {
    let title_ru = table.cell(row, columns::TITLE_RU)?;
    let text = |header: &str| table.cell(row, header).unwrap_or_default().to_string();

    let courses = course_columns
        .iter()
        .filter(|header| {
            table
                .cell(row, header)
                .is_some_and(|value| value.to_lowercase() == columns::COURSE_OFFERED)
        })
        .map(|header| header.to_string())
        .collect();

    let tags = table
        .cell(row, columns::TAGS)
        .map(sanitize_tags)
        .unwrap_or_default();

    Some(Project {
        id: format!("project_{}", index),
        title_ru: title_ru.to_string(),
        title_en: text(columns::TITLE_EN),
        supervisor: text(columns::SUPERVISOR),
        co_supervisor: text(columns::CO_SUPERVISOR),
        annotation: text(columns::ANNOTATION),
        goals: text(columns::GOALS),
        tasks: text(columns::TASKS),
        requirements: text(columns::REQUIREMENTS),
        project_type: text(columns::PROJECT_TYPE),
        format: text(columns::FORMAT),
        courses,
        tags,
        contact: text(columns::CONTACT),
        team_size: text(columns::TEAM_SIZE),
        selection_form: text(columns::SELECTION_FORM),
        preferred_contact: text(columns::PREFERRED_CONTACT),
        video_link: text(columns::VIDEO_LINK),
        presentation_link: text(columns::PRESENTATION_LINK),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursework_core::parse_dataset;
    use tempfile::TempDir;

    const EXPORT: &str = "\
Наименование проекта на русском;Наименование проекта на английском;ФИО руководителя;Тип проекта;Вид проекта;1 курс;2 курс;Теги проекта
Чат-бот;Chat bot;Иванов И.И.;Прикладной;Групповой;да;Нет;NLP, LLM, Кулинария
;Empty;Петров П.П.;Исследовательский;Индивидуальный;да;да;
Анализ тональности;Sentiment;Иванов И.И.;Исследовательский;Групповой;НЕТ;ДА;
";

    #[test]
    fn test_extract_projects_maps_columns() {
        let projects = ProjectsCsvExtractor::new()
            .extract_projects(EXPORT.as_bytes())
            .unwrap();

        assert_eq!(projects.len(), 2);

        let first = &projects[0];
        assert_eq!(first.id, "project_0");
        assert_eq!(first.title_en, "Chat bot");
        assert_eq!(first.project_type, "Прикладной");
        assert_eq!(first.courses, vec!["1 курс"]);
        assert_eq!(first.tags, vec!["NLP", "LLM"]);
        assert_eq!(first.co_supervisor, "");

        let second = &projects[1];
        assert_eq!(second.id, "project_2");
        assert_eq!(second.courses, vec!["2 курс"]);
        assert!(second.tags.is_empty());
    }

    #[test]
    fn test_missing_title_column_is_rejected() {
        let result = ProjectsCsvExtractor::new().extract_projects("a;b\n1;2\n".as_bytes());
        assert!(matches!(result, Err(ExtractionError::InvalidInput(_))));
    }

    #[test]
    fn test_import_builds_supervisor_index() {
        let report = ProjectsCsvExtractor::new()
            .import(EXPORT.as_bytes(), None)
            .unwrap();

        assert_eq!(report.added, 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.data.supervisors.len(), 1);
        assert_eq!(
            report.data.supervisors[0].projects,
            vec!["project_0", "project_2"]
        );
        assert_eq!(report.data.tags, vec!["LLM", "NLP"]);
        assert_eq!(report.data.metadata.total_tags, 2);
    }

    #[test]
    fn test_import_file_resumes() {
        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("export.csv");
        let output_path = dir.path().join("data").join("projects.json");
        fs::write(&csv_path, EXPORT).unwrap();

        let extractor = ProjectsCsvExtractor::new();
        let first = extractor.import_file(&csv_path, &output_path).unwrap();
        assert_eq!(first.added, 2);

        let second = extractor.import_file(&csv_path, &output_path).unwrap();
        assert_eq!(second.added, 0);
        assert_eq!(second.skipped, 2);

        let written = parse_dataset(&fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(written.projects.len(), 2);
        assert_eq!(written.metadata.total_supervisors, 1);
    }

    #[test]
    fn test_import_file_requires_csv() {
        let dir = TempDir::new().unwrap();
        let result = ProjectsCsvExtractor::new()
            .import_file(dir.path().join("missing.csv"), dir.path().join("out.json"));
        assert!(matches!(result, Err(ExtractionError::InvalidInput(_))));
    }
}
