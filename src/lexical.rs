//! Lexical detection tables shared by the analyzers: confusable characters,
//! brand tokens with their legitimate domains, phishing phrase lists, and
//! pre-compiled leetspeak patterns (no per-call compilation).

use once_cell::sync::Lazy;
use regex::Regex;

/// Cyrillic/Greek characters that render like Latin letters in a hostname.
const CONFUSABLES: &[char] = &[
    'а', 'е', 'о', 'р', 'с', 'у', 'х', 'і', 'ѕ', 'ј', 'ԁ', 'һ', 'ԛ', 'ѡ',
    'ο', 'α', 'ε', 'ι', 'κ', 'ν', 'ρ', 'τ', 'υ', 'χ', 'ω', 'β', 'η', 'μ',
    'ɡ', 'ɑ', 'ⅼ', 'ⅰ',
];

/// Confusable characters present in `s`, in order of appearance.
pub fn confusables_in(s: &str) -> Vec<char> {
    s.chars().filter(|c| CONFUSABLES.contains(c)).collect()
}

/// A brand token together with the domains legitimately allowed to carry it.
pub struct Brand {
    pub token: &'static str,
    pub legitimate: &'static [&'static str],
}

pub const BRANDS: &[Brand] = &[
    Brand { token: "paypal", legitimate: &["paypal.com", "paypal.me"] },
    Brand { token: "amazon", legitimate: &["amazon.com", "amazon.co.uk", "amazon.de", "amazonaws.com"] },
    Brand { token: "google", legitimate: &["google.com", "googleapis.com", "googleusercontent.com"] },
    Brand { token: "apple", legitimate: &["apple.com"] },
    Brand { token: "icloud", legitimate: &["icloud.com"] },
    Brand { token: "microsoft", legitimate: &["microsoft.com", "microsoftonline.com"] },
    Brand { token: "netflix", legitimate: &["netflix.com"] },
    Brand { token: "facebook", legitimate: &["facebook.com", "fb.com"] },
    Brand { token: "instagram", legitimate: &["instagram.com"] },
    Brand { token: "chase", legitimate: &["chase.com"] },
    Brand { token: "wellsfargo", legitimate: &["wellsfargo.com"] },
    Brand { token: "coinbase", legitimate: &["coinbase.com"] },
    Brand { token: "binance", legitimate: &["binance.com"] },
];

/// Hostname fragments typical of credential-harvesting domains.
pub const SUSPICIOUS_TOKENS: &[&str] = &[
    "-login", "login-", "-signin", "signin-", "-verify", "verify-",
    "-secure", "secure-", "-account", "account-", "-update", "update-",
    "-confirm", "confirm-", "webscr",
];

/// Urgency/account-verification phrases, matched case-insensitively against
/// lower-cased page text. Occurrences are counted, not just presence.
pub const URGENCY_PHRASES: &[&str] = &[
    "urgent",
    "immediately",
    "act now",
    "verify your account",
    "account suspended",
    "account has been locked",
    "account will be closed",
    "limited time",
    "expires today",
    "final notice",
    "confirm your identity",
    "unusual activity",
    "security alert",
];

/// Financial/sensitive-data keywords; distinct presence is counted.
pub const FINANCIAL_KEYWORDS: &[&str] = &[
    "credit card",
    "card number",
    "cvv",
    "social security",
    "ssn",
    "bank account",
    "account number",
    "routing number",
    "password",
    "pin code",
    "date of birth",
    "mother's maiden name",
];

/// Reward/prize-bait phrases; first match wins.
pub const REWARD_PHRASES: &[&str] = &[
    "you have won",
    "you've been selected",
    "congratulations",
    "claim your prize",
    "claim your reward",
    "free gift",
    "lucky winner",
    "cash prize",
];

/// TLDs with disproportionate abuse rates.
pub const HIGH_RISK_TLDS: &[&str] = &[
    "tk", "ml", "ga", "cf", "gq", "xyz", "top", "work", "click", "loan",
    "win", "bid", "racing", "stream", "download",
];

/// Leetspeak substitutions of common security words ("acc0unt", "v3rify").
/// The base letters also match, so a hit only counts as an anomaly when the
/// matched text actually contains a substituted character.
static LEET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"[a4@]cc[o0]unt",
        r"v[e3]r[i1!]fy",
        r"p[a4@][s5][s5]w[o0]rd",
        r"[s5][e3]cur[e3]",
        r"l[o0]g[i1!]n",
        r"b[a4@]nk[i1!]ng",
        r"[i1!]nv[o0][i1!]c[e3]",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
    .collect()
});

/// Number of leetspeak-substituted security words in `text`.
pub fn spelling_anomaly_count(text: &str) -> usize {
    LEET_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text))
        .filter(|m| m.as_str().chars().any(|c| c.is_ascii_digit() || c == '@' || c == '!'))
        .count()
}

/// Textual patterns typical of freshly registered throwaway domains: a run of
/// 4+ digits, a hyphen-delimited number, or a temp/test marker.
static NEW_DOMAIN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(r"\d{4,}").unwrap(), Regex::new(r"-\d+").unwrap()]
});

/// Approximate "looks newly registered" proxy. Deliberately textual — this is
/// not a registration-date lookup and must not be extended toward one.
pub fn looks_newly_registered(domain: &str) -> bool {
    NEW_DOMAIN_PATTERNS.iter().any(|re| re.is_match(domain))
        || domain.contains("temp")
        || domain.contains("test")
}
