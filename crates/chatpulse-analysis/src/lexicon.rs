//! Built-in word polarity lists.
//!
//! AFINN-style integer weights in `[-5, 5]`. Entries are surface forms; the
//! scorer stems them with the language's stemmer before lookup.

pub(crate) const MAX_WEIGHT: i8 = 5;

pub(crate) const ENGLISH: &[(&str, i8)] = &[
    // Positive
    ("amazing", 4),
    ("awesome", 4),
    ("best", 3),
    ("brilliant", 4),
    ("calm", 2),
    ("cheap", 1),
    ("comfortable", 2),
    ("easy", 1),
    ("excellent", 3),
    ("fantastic", 4),
    ("friendly", 2),
    ("glad", 3),
    ("good", 3),
    ("great", 3),
    ("happy", 3),
    ("help", 2),
    ("helpful", 2),
    ("love", 3),
    ("lucky", 3),
    ("nice", 3),
    ("outstanding", 5),
    ("perfect", 3),
    ("pleased", 3),
    ("recommend", 2),
    ("safe", 1),
    ("success", 2),
    ("superb", 5),
    ("thank", 2),
    ("thanks", 2),
    ("wonderful", 4),
    // Negative
    ("angry", -3),
    ("awful", -3),
    ("bad", -3),
    ("broken", -1),
    ("complain", -2),
    ("danger", -2),
    ("disaster", -2),
    ("expensive", -2),
    ("fail", -2),
    ("fear", -2),
    ("fraud", -4),
    ("hate", -3),
    ("horrible", -3),
    ("lost", -3),
    ("nightmare", -3),
    ("poor", -2),
    ("problem", -2),
    ("refused", -2),
    ("sad", -2),
    ("scam", -2),
    ("scared", -2),
    ("stress", -1),
    ("terrible", -3),
    ("tired", -2),
    ("ugly", -3),
    ("unfortunately", -2),
    ("worried", -3),
    ("worst", -3),
    ("wrong", -2),
    ("fuck", -4),
    ("catastrophic", -4),
    ("torture", -4),
    ("bastard", -5),
];

pub(crate) const RUSSIAN: &[(&str, i8)] = &[
    // Positive
    ("благодарю", 2),
    ("быстро", 1),
    ("великолепный", 4),
    ("выгодно", 2),
    ("замечательный", 4),
    ("удобно", 2),
    ("классный", 3),
    ("красивый", 3),
    ("легко", 1),
    ("лучший", 3),
    ("любить", 3),
    ("молодец", 3),
    ("отлично", 3),
    ("отличный", 3),
    ("помогли", 2),
    ("помощь", 2),
    ("порекомендовать", 2),
    ("прекрасный", 4),
    ("радость", 3),
    ("рад", 3),
    ("советую", 2),
    ("спасибо", 2),
    ("спокойно", 2),
    ("супер", 4),
    ("счастливый", 3),
    ("удача", 3),
    ("хорошо", 3),
    ("хороший", 3),
    ("чудесный", 4),
    ("шикарный", 5),
    // Negative
    ("беда", -3),
    ("бесит", -3),
    ("боюсь", -2),
    ("грустно", -2),
    ("дорого", -2),
    ("жаль", -2),
    ("ужас", -3),
    ("ужасный", -3),
    ("кошмар", -3),
    ("мошенник", -4),
    ("обман", -3),
    ("отказ", -2),
    ("отказали", -2),
    ("плохо", -3),
    ("плохой", -3),
    ("проблема", -2),
    ("развод", -2),
    ("сложно", -1),
    ("страшно", -2),
    ("стресс", -1),
    ("тяжело", -2),
    ("ужасно", -3),
    ("устал", -2),
    ("худший", -3),
    ("грабеж", -4),
    ("катастрофа", -4),
    ("ненавижу", -3),
    ("мерзкий", -5),
];
