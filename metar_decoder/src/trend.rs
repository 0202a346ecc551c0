use itertools::Itertools;

pub const NOSIG: &str = "Sin cambios significativos (NOSIG)";

const TREND_KEYWORDS: [&str; 2] = ["BECMG", "TEMPO"];

/// `NOSIG`, then every `BECMG`/`TEMPO` group with the tokens that follow it up
/// to the next trend keyword.
pub fn decode_trends(tokens: &[&str]) -> Vec<String> {
    let mut trends = Vec::new();
    if tokens.contains(&"NOSIG") {
        trends.push(NOSIG.to_string());
    }

    let starts = tokens
        .iter()
        .positions(|token| TREND_KEYWORDS.contains(token))
        .collect_vec();
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(tokens.len());
        let content = tokens[start + 1..end].join(" ");
        if !content.is_empty() {
            trends.push(format!("{}: {content}", tokens[start]));
        }
    }
    trends
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nosig() {
        assert_eq!(decode_trends(&["Q1008", "NOSIG"]), [NOSIG]);
        assert!(decode_trends(&["Q1008"]).is_empty());
    }

    #[test]
    fn test_groups() {
        let tokens = [
            "Q1012", "BECMG", "FM1500", "25015KT", "TEMPO", "3000", "SHRA", "TEMPO", "TSRA",
        ];
        assert_eq!(
            decode_trends(&tokens),
            [
                "BECMG: FM1500 25015KT",
                "TEMPO: 3000 SHRA",
                "TEMPO: TSRA",
            ]
        );
    }

    #[test]
    fn test_empty_group_is_skipped() {
        assert_eq!(decode_trends(&["BECMG", "TEMPO", "BR"]), ["TEMPO: BR"]);
        assert!(decode_trends(&["Q1012", "BECMG"]).is_empty());
    }
}
