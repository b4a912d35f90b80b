//! `_position.yaml` rendering
//!
//! The host application orders models by this file. It is a plain YAML list
//! of ids, grouped by family with a comment header per group.

/// Name of the ordering file inside a manifest directory
pub const POSITION_FILE_NAME: &str = "_position.yaml";

/// Render the ordering file for the given model ids, in the order given.
///
/// Families keep the order in which they first appear.
pub fn render_position_file<'a, I>(model_ids: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();

    for id in model_ids {
        let family = id.split('/').next().unwrap_or_default();
        match groups.iter_mut().find(|(name, _)| *name == family) {
            Some((_, ids)) => ids.push(id),
            None => groups.push((family, vec![id])),
        }
    }

    let mut lines = Vec::new();
    for (family, ids) in &groups {
        lines.push(format!("# {} Models", title_case(family)));
        lines.extend(ids.iter().map(|id| format!("- {}", id)));
        lines.push(String::new());
    }

    format!("{}\n", lines.join("\n").trim_end())
}

/// Title-case a family name: each alphabetic run starts uppercase and
/// continues lowercase (`meta-llama` becomes `Meta-Llama`, `01-ai` becomes
/// `01-Ai`).
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("meta-llama"), "Meta-Llama");
        assert_eq!(title_case("deepseek"), "Deepseek");
        assert_eq!(title_case("01-ai"), "01-Ai");
        assert_eq!(title_case("THUDM"), "Thudm");
        assert_eq!(title_case("qwen2vl"), "Qwen2Vl");
    }

    #[test]
    fn test_render_groups_in_first_appearance_order() {
        let ids = [
            "meta-llama/llama-3-8b-instruct",
            "deepseek/deepseek-r1",
            "meta-llama/llama-3-70b-instruct",
        ];

        let rendered = render_position_file(ids);

        assert_eq!(
            rendered,
            "# Meta-Llama Models\n\
             - meta-llama/llama-3-8b-instruct\n\
             - meta-llama/llama-3-70b-instruct\n\
             \n\
             # Deepseek Models\n\
             - deepseek/deepseek-r1\n"
        );
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_position_file(Vec::<&str>::new()), "\n");
    }

    #[test]
    fn test_render_output_is_yaml_list() {
        let rendered = render_position_file(["a/one", "b/two"]);
        let parsed: Vec<String> = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(parsed, vec!["a/one", "b/two"]);
    }
}
