use std::collections::HashSet;

pub const MAX_TAGS_PER_PROJECT: usize = 5;

/// Thematic vocabulary projects are tagged from
pub const MASTER_TAGS: &[&str] = &[
    "Искусственный интеллект",
    "Машинное обучение",
    "Глубокое обучение",
    "LLM",
    "NLP",
    "Компьютерное зрение",
    "Обработка изображений",
    "Анализ данных",
    "Визуализация данных",
    "Веб-разработка",
    "Мобильная разработка",
    "Игровая разработка",
    "Видеоигры",
    "Кибербезопасность",
    "Блокчейн",
    "Криптография",
    "Квантовые вычисления",
    "Медицина",
    "Биоинформатика",
    "Здоровье",
    "Финансы",
    "Банкинг",
    "Торговля",
    "Образование",
    "E-learning",
    "Социальные сети",
    "Коммуникации",
    "Интернет вещей",
    "IoT",
    "Робототехника",
    "Автоматизация",
    "Энергетика",
    "Экология",
    "Устойчивое развитие",
    "Климат",
    "Транспорт",
    "Логистика",
    "Геолокация",
    "Карты",
    "Музыка",
    "Аудио",
    "Видео",
    "Мультимедиа",
    "Психология",
    "Поведение",
    "UX/UI",
    "Дизайн",
    "Лингвистика",
    "Перевод",
    "Текст",
    "Документы",
    "Архитектура",
    "Инфраструктура",
    "Облачные вычисления",
    "DevOps",
];

pub fn is_known_tag(tag: &str) -> bool {
    MASTER_TAGS.contains(&tag)
}

/// Parse a comma separated tag cell, keeping known tags in their original
/// order up to [`MAX_TAGS_PER_PROJECT`]
pub fn sanitize_tags(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    raw.split(',')
        .map(str::trim)
        .filter(|tag| is_known_tag(tag))
        .filter(|&tag| seen.insert(tag))
        .take(MAX_TAGS_PER_PROJECT)
        .map(str::to_string)
        .collect()
}
