use crate::domain::model::{Phase, SortKey, Tool};
use std::cmp::Ordering;

/// 目前的篩選與排序條件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogView {
    pub phase: Option<Phase>,
    pub sort: SortKey,
}

impl CatalogView {
    pub fn new(phase: Option<Phase>, sort: SortKey) -> Self {
        Self { phase, sort }
    }

    pub fn apply<'a>(&self, tools: &'a [Tool]) -> Vec<&'a Tool> {
        derive(tools, self.phase, self.sort)
    }
}

/// 篩選並排序，不修改輸入；排序為穩定排序
pub fn derive(tools: &[Tool], phase: Option<Phase>, sort: SortKey) -> Vec<&Tool> {
    let mut visible: Vec<&Tool> = tools
        .iter()
        .filter(|tool| phase.map_or(true, |p| tool.phase == p))
        .collect();

    match sort {
        SortKey::Name => visible.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        // 沒有評分視為 0，自然排在最後
        SortKey::Rating => visible.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero())),
        SortKey::Phase => visible.sort_by(|a, b| a.phase.as_str().cmp(b.phase.as_str())),
    }

    visible
}

/// 近似瀏覽器 `localeCompare` 的字串比較：
/// 先忽略大小寫與常見重音符號比較，相同時小寫排在大寫前面。
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = fold_chars(a).cmp(fold_chars(b));
    if primary != Ordering::Equal {
        return primary;
    }

    let accents = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if accents != Ordering::Equal {
        return accents;
    }

    b.cmp(a)
}

fn fold_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).map(strip_accent)
}

fn strip_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
