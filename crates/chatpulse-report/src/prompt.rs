//! Prompt assembly for the report provider.

use chatpulse_analysis::{AnalysisArtifact, CategoryCounts};
use chatpulse_core::RegionConfig;

/// Phrases quoted in the prompt, taken from the head of the ranking.
pub const PROMPT_TOP_PHRASES: usize = 5;

/// Upper bound on message bodies quoted verbatim.
pub const MAX_SAMPLE_MESSAGES: usize = 50;

/// Rounded percentage of `part` in `total`; `0` when `total` is zero.
fn percent(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    part.saturating_mul(200).saturating_add(total) / total.saturating_mul(2)
}

fn write_distribution(prompt: &mut String, counts: &CategoryCounts) {
    if counts.is_empty() {
        prompt.push_str("   - нет данных\n");
        return;
    }
    for (category, count) in counts {
        prompt.push_str(&format!("   - {category}: {count} сообщений\n"));
    }
}

/// Composes the instruction prompt for one region.
///
/// `samples` are message bodies quoted as context; only the first
/// [`MAX_SAMPLE_MESSAGES`] are used.
#[must_use]
pub fn build_prompt(region: &RegionConfig, artifact: &AnalysisArtifact, samples: &[&str]) -> String {
    let total = artifact.message_count;
    let s = &artifact.sentiments;
    let mut prompt = String::new();

    prompt.push_str(
        "Проанализируй сообщения из чатов и создай аналитический отчет.\n\
         Используй только ключевые данные и основные выводы, без излишней детализации.\n\n",
    );

    prompt.push_str("Контекст:\n");
    prompt.push_str(&format!("- География: {} ({})\n", region.name, region.code));
    prompt.push_str(&format!("- Всего сообщений: {total}\n"));
    prompt.push('\n');

    prompt.push_str("Основные метрики:\n1. Эмоциональный фон:\n");
    for (label, count) in [
        ("Позитивных", s.positive),
        ("Негативных", s.negative),
        ("Нейтральных", s.neutral),
    ] {
        prompt.push_str(&format!(
            "   - {label}: {count} ({}%)\n",
            percent(count, total)
        ));
    }

    prompt.push_str(&format!("2. Топ-{PROMPT_TOP_PHRASES} популярных фраз:\n"));
    if artifact.top_phrases.is_empty() {
        prompt.push_str("   - нет данных\n");
    }
    for entry in artifact.top_phrases.iter().take(PROMPT_TOP_PHRASES) {
        prompt.push_str(&format!(
            "   - \"{}\" ({} раз)\n",
            entry.phrase, entry.count
        ));
    }

    prompt.push_str("3. Распределение по темам:\n");
    write_distribution(&mut prompt, &artifact.theme_count);
    prompt.push_str("4. Потребности и проблемы:\n");
    write_distribution(&mut prompt, &artifact.needs_count);
    prompt.push('\n');

    if !samples.is_empty() {
        prompt.push_str("Примеры сообщений:\n");
        for body in samples.iter().take(MAX_SAMPLE_MESSAGES) {
            prompt.push_str(&format!("- {}\n", body.trim()));
        }
        prompt.push('\n');
    }

    prompt.push_str(
        "Требования к отчету:\n\
         1. Структура:\n\
         \x20  - Краткое резюме (10-12 предложений)\n\
         \x20  - Детальный анализ по темам\n\
         \x20  - Эмоциональная картина\n\
         \x20  - Проблемы и потребности\n\
         \x20  - Рекомендации\n\
         2. Особенности:\n\
         \x20  - Анализируй контекст фраз, а не только частоту\n\
         \x20  - Выявляй скрытые проблемы\n\
         \x20  - Предлагай практические решения\n\
         3. Формат:\n\
         \x20  - Четкая структура с заголовками\n\
         \x20  - Без markdown разметки (##, **, ---)\n\
         \x20  - Простой текстовый формат\n\
         \x20  - Конкретные цифры и примеры\n",
    );
    prompt.push_str(&format!("Язык отчета: {}.\n", region.report_language));

    prompt
}
