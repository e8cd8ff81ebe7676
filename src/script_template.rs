// @module: Starter script for a news roundup

/// Opening line of every generated script
pub const TEMPLATE_GREETING: &str = "E aí cambada! Tô de volta com mais uma Rapidinha Cripto!";

/// Closing line of every generated script
pub const TEMPLATE_FAREWELL: &str =
    "É isso cambada! Se gostou, deixa o like e compartilha com a galera. Até a próxima Rapidinha Cripto!";

/// Generate a script skeleton with `num_items` numbered headlines about `topic`
pub fn generate_script(topic: &str, num_items: usize) -> String {
    let mut script = format!("{}\n\n", TEMPLATE_GREETING);
    script.push_str(&format!("Hoje vamos falar sobre {}.\n\n", topic));

    for i in 1..=num_items {
        script.push_str(&format!("{}. Notícia {} sobre {}\n", i, i, topic));
        script.push_str(&format!("   Detalhes da notícia {}...\n\n", i));
    }

    script.push_str(TEMPLATE_FAREWELL);
    script
}
