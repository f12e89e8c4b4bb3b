//! Column headers of the project application export

pub const TITLE_RU: &str = "Наименование проекта на русском";
pub const TITLE_EN: &str = "Наименование проекта на английском";
pub const SUPERVISOR: &str = "ФИО руководителя";
pub const CO_SUPERVISOR: &str = "ФИО соруководителя";
pub const ANNOTATION: &str = "Аннотация проекта";
pub const GOALS: &str = "Цель проекта";
pub const TASKS: &str = "Задачи проекта";
pub const REQUIREMENTS: &str = "Требования, предъявляемые к студентам";
pub const PROJECT_TYPE: &str = "Тип проекта";
pub const FORMAT: &str = "Вид проекта";
pub const CONTACT: &str = "Контактная почта соруководителя";
pub const TEAM_SIZE: &str = "Предполагаемое кол-во студентов на проекте";
pub const SELECTION_FORM: &str = "Форма отбора на проект";
pub const PREFERRED_CONTACT: &str = "Предпочтительный способ связи";
pub const VIDEO_LINK: &str = "Ссылка на видео-ролик проекта";
pub const PRESENTATION_LINK: &str = "Ссылка на презентацию проекта";
pub const TAGS: &str = "Теги проекта";

/// Substring marking a per-course availability column
pub const COURSE_MARKER: &str = "курс";
/// Cell value meaning the project is offered for that course
pub const COURSE_OFFERED: &str = "да";
