use uuid::Uuid;

/// Gera um ID textual com o prefixo da entidade (ex: "sal-550e8400-...").
/// O prefixo identifica a tabela de origem quando o ID aparece em logs
/// ou em descrições como "Venda #<id>".
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_carries_prefix() {
        let id = generate_id("sal");
        assert!(id.starts_with("sal-"));
        assert!(id.len() > 4);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(generate_id("prd"), generate_id("prd"));
    }
}
