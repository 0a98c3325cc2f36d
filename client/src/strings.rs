//! User-facing text. The backend and its users speak Russian.

pub const UPLOAD_IDLE_LABEL: &str = "📁 Загрузить файл";
pub const UPLOAD_BUSY_LABEL: &str = "⏳ Загрузка...";

pub const DOCUMENTS_LOADING: &str = "Загрузка документов...";
pub const DOCUMENTS_EMPTY: &str = "Нет загруженных документов";
pub const CONFIRM_DELETE: &str = "Вы уверены, что хотите удалить этот документ?";

pub const LIST_FAILED: &str = "Ошибка при загрузке документов";
pub const UPLOAD_FAILED: &str = "Ошибка при загрузке файла";
pub const DELETE_FAILED: &str = "Ошибка при удалении документа";
pub const DOCUMENT_NOT_FOUND: &str = "Документ не найден";
pub const CHAT_FAILED: &str = "Ошибка при получении ответа";
pub const SEARCH_FAILED: &str = "Ошибка при поиске";
pub const SUMMARY_FAILED: &str = "Ошибка при суммаризации";
pub const REFERAT_FAILED: &str = "Ошибка при создании реферативного перевода";
pub const WEB_SEARCH_FAILED: &str = "Ошибка при веб-поиске";

pub const THINKING: &str = "Думаю...";
pub const SEARCHING: &str = "Ищу по документам...";
pub const WEB_SEARCHING: &str = "Ищу в интернете...";
pub const SUMMARY_PENDING: &str = "Генерирую краткое содержание документа...";
pub const REFERAT_PENDING: &str =
    "⏳ Создаю реферативный перевод документа...\n\nЭто может занять несколько минут для больших документов.";

pub const SELECT_FOR_SUMMARY: &str = "⚠️ Пожалуйста, выберите документ для суммаризации.";
pub const SELECT_FOR_REFERAT: &str =
    "⚠️ Пожалуйста, выберите документ для создания реферативного перевода.";
pub const SELECT_HINT: &str = "Выберите документ из списка слева";

pub const SUMMARY_DONE: &str = "Суммаризация завершена";
pub const REFERAT_DONE: &str = "Реферативный перевод готов! Файл доступен для скачивания.";

pub const SOURCES_HEADING: &str = "Источники:";
pub const NO_SEARCH_RESULTS: &str = "Ничего не найдено.";

pub fn error_text(message: &str) -> String {
    format!("Ошибка: {message}")
}

pub fn status_line(filename: &str) -> String {
    format!("🎯 Поиск в документе: {filename}")
}

pub fn summary_error(message: &str) -> String {
    format!("❌ Ошибка при суммаризации: {message}")
}

pub fn referat_error(message: &str) -> String {
    format!("❌ Ошибка при создании реферативного перевода: {message}")
}
