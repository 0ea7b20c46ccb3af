//! Relevance and quality heuristics for discovered resources.
//!
//! All checks work on lowercased substrings of the URL and title. The lists
//! favor documentation, tutorial and course sites over Q&A threads, social
//! media and university LMS portals.

const HIGH_VALUE_DOMAINS: &[&str] = &[
    "docs.",
    "documentation",
    "tutorialspoint.com",
    "w3schools.com",
    "freecodecamp.org",
    "codecademy.com",
    "coursera.org",
    "udemy.com",
    "edx.org",
    "khanacademy.org",
    "pluralsight.com",
    "realpython.com",
    "javascript.info",
    "react.dev",
    "djangoproject.com",
    "python.org",
    "developer.mozilla.org",
    "web.dev",
    "geeksforgeeks.org",
    "mdn",
    "learn.microsoft.com",
    "tensorflow.org",
    "keras.io",
    "pytorch.org",
    "scikit-learn.org",
    "numpy.org",
    "matplotlib.org",
    "pandas.pydata.org",
    "tutorial",
    "guide",
    "getting-started",
];

const MEDIUM_VALUE_DOMAINS: &[&str] = &[
    "github.com",
    "medium.com",
    "dev.to",
    "towardsdatascience.com",
    "css-tricks.com",
    "smashingmagazine.com",
];

/// Sites whose content is predominantly not in English.
const NON_ENGLISH_DOMAINS: &[&str] = &[
    "zhihu.com",
    "baidu.com",
    "douban.com",
    "weibo.com",
    "qq.com",
    "163.com",
    "sina.com.cn",
    "sohu.com",
    "yandex.ru",
    "mail.ru",
    "rambler.ru",
    "naver.com",
    "daum.net",
    ".jp/",
    ".kr/",
    ".cn/",
    ".ru/",
];

/// Q&A threads, social media, closed LMS platforms and support portals.
const EXCLUDED_DOMAINS: &[&str] = &[
    "stackoverflow.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "linkedin.com",
    "pinterest.com",
    "reddit.com",
    "youtube.com/watch",
    "blackboard.com",
    "canvas.net",
    "moodle.org",
    "brightspace.com",
    "support.google.com",
    "support.microsoft.com",
    "help.",
];

/// Allow-listed educational sites; a match short-circuits validation.
const EDUCATIONAL_DOMAINS: &[&str] = &[
    "github.com",
    "docs.",
    "tutorial",
    "learn",
    "course",
    "documentation",
    "guide",
    "w3schools",
    "mdn",
    "freecodecamp",
    "coursera",
    "udemy",
    "edx",
    "khanacademy",
    "medium.com",
    "dev.to",
    "towardsdatascience.com",
    "geeksforgeeks.org",
    "tutorialspoint.com",
    "codecademy.com",
    "pluralsight.com",
    "realpython.com",
    "javascript.info",
    "react.dev",
    "djangoproject.com",
    "python.org",
    "nodejs.org",
    "developer.mozilla.org",
    "web.dev",
    "css-tricks.com",
    "smashingmagazine.com",
];

/// Signs of an LMS or account page rather than public learning content.
const LMS_INDICATORS: &[&str] = &[
    "course/index.php",
    "/lms/",
    "/blackboard/",
    "/moodle/",
    "/canvas/",
    "/brightspace/",
    "student portal",
    "enrollment",
    "registration",
    "login",
    "sign in",
    "my courses",
];

const SCORING_TITLE_KEYWORDS: &[&str] = &[
    "tutorial",
    "learn",
    "course",
    "documentation",
    "guide",
    "getting started",
    "introduction",
    "basics",
    "fundamentals",
    "how to",
    "example",
    "reference",
    "docs",
];

const VALIDATION_TITLE_KEYWORDS: &[&str] = &[
    "tutorial",
    "learn",
    "course",
    "documentation",
    "guide",
    "getting started",
    "introduction",
    "basics",
    "fundamentals",
    "how to",
    "example",
    "reference",
    "api",
    "docs",
    "training",
    "getting-started",
    "beginner",
    "overview",
    "crash course",
    "handbook",
    "manual",
    "book",
    "library",
    "framework",
];

const LOW_QUALITY_TITLE_INDICATORS: &[&str] = &[
    "question",
    "answer",
    "error",
    "problem",
    "issue",
    "bug",
    "why does",
    "how do i",
    "what is the difference",
];

const ENGLISH_TLDS: &[&str] = &[".com", ".org", ".net", ".io", ".dev", ".edu", ".co.uk"];

const STOPWORDS: &[&str] = &[
    "the",
    "a",
    "an",
    "and",
    "or",
    "for",
    "with",
    "development",
    "basics",
    "fundamentals",
    "&",
    "environment",
];

/// Keywords extracted from a concept name, main words separated from
/// parenthetical ones. Handles names like
/// "Python ML ecosystem (NumPy, Matplotlib, PIL/OpenCV)".
pub(crate) struct ConceptTerms {
    pub main: Vec<String>,
    pub parenthetical: Vec<String>,
}

pub(crate) fn concept_terms(concept: &str) -> ConceptTerms {
    let lower = concept.to_lowercase();
    let (outside, inside) = split_parens(&lower);

    let main = outside
        .split_whitespace()
        .filter(|w| !STOPWORDS.contains(w))
        .map(String::from)
        .collect();

    let parenthetical = inside
        .map(|inner| {
            inner
                .replace('/', " ")
                .replace(',', " ")
                .split_whitespace()
                .filter(|w| w.len() > 2)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    ConceptTerms { main, parenthetical }
}

fn split_parens(s: &str) -> (String, Option<String>) {
    match (s.find('('), s.rfind(')')) {
        (Some(open), Some(close)) if close > open => {
            let outside = format!("{} {}", &s[..open], &s[close + 1..]);
            (outside, Some(s[open + 1..close].to_string()))
        }
        _ => (s.to_string(), None),
    }
}

/// Whether a result looks like it is about the concept at all: any of the
/// first few concept keywords must appear in the title or URL.
pub fn is_relevant(title: &str, url: &str, concept: &str) -> bool {
    let title = title.to_lowercase();
    let url = url.to_lowercase();

    let terms = concept_terms(concept);
    let mut keywords = terms.main;
    keywords.extend(terms.parenthetical);

    if keywords.is_empty() {
        let head: String = concept.to_lowercase().chars().take(20).collect();
        return title.contains(&head) || url.contains(&head);
    }

    keywords
        .iter()
        .take(5)
        .any(|w| title.contains(w) || url.contains(w))
}

/// Score a result by educational value. Higher is better; used to rank the
/// resources that survive validation.
pub fn score_resource(url: &str, title: &str, concept: &str) -> i32 {
    let url = url.to_lowercase();
    let title = title.to_lowercase();
    let mut score = 1;

    if HIGH_VALUE_DOMAINS
        .iter()
        .any(|d| url.contains(d) || title.contains(d))
    {
        score += 10;
    } else if MEDIUM_VALUE_DOMAINS
        .iter()
        .any(|d| url.contains(d) || title.contains(d))
    {
        score += 5;
    }

    if SCORING_TITLE_KEYWORDS.iter().any(|k| title.contains(k)) {
        score += 3;
    }

    let terms = concept_terms(concept);
    if terms.main.iter().take(3).any(|w| title.contains(w)) {
        score += 2;
    }
    if terms.parenthetical.iter().take(2).any(|w| title.contains(w)) {
        score += 2;
    }

    if LOW_QUALITY_TITLE_INDICATORS.iter().any(|k| title.contains(k)) {
        score -= 2;
    }

    score.max(0)
}

/// Whether a result looks like a public, English-language learning resource.
pub fn is_valid_resource(url: &str, title: &str, concept: &str) -> bool {
    let url_lower = url.to_lowercase();
    let title_lower = title.to_lowercase();

    if NON_ENGLISH_DOMAINS.iter().any(|d| url_lower.contains(d)) {
        return false;
    }
    if EXCLUDED_DOMAINS.iter().any(|d| url_lower.contains(d)) {
        return false;
    }

    // Titles that are mostly non-ASCII are unlikely to be English content.
    let total = title.chars().count();
    let non_ascii = title.chars().filter(|c| !c.is_ascii()).count();
    if total > 0 && non_ascii * 10 > total * 3 {
        return false;
    }

    if EDUCATIONAL_DOMAINS
        .iter()
        .any(|d| url_lower.contains(d) || title_lower.contains(d))
    {
        return true;
    }

    // Python-style split('/', 3): everything past the domain.
    let url_path = url_lower.splitn(4, '/').last().unwrap_or("");
    if LMS_INDICATORS
        .iter()
        .any(|ind| url_path.contains(ind) || title_lower.contains(ind))
    {
        return false;
    }

    let has_keyword = VALIDATION_TITLE_KEYWORDS
        .iter()
        .any(|k| title_lower.contains(k));
    let terms = concept_terms(concept);
    let has_concept = terms.main.iter().take(3).any(|w| title_lower.contains(w));
    if !has_keyword && !has_concept {
        return false;
    }

    ENGLISH_TLDS.iter().any(|tld| url_lower.contains(tld))
}
