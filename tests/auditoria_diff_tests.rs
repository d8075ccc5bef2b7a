use serde_json::json;
use vitrine::auditoria::diff_campos;

#[test]
fn test_diff_atualizacao_de_preco() {
    let antes = r#"{"id": 3, "nome": "Manicure", "preco": 250.0, "preco_promocional": null}"#;
    let depois = r#"{"id": 3, "nome": "Manicure", "preco": 250.0, "preco_promocional": 199.0}"#;

    let alteracoes = diff_campos(Some(antes), Some(depois)).expect("Deve comparar");
    assert_eq!(alteracoes.len(), 1);
    assert_eq!(alteracoes[0].campo, "preco_promocional");
    assert_eq!(alteracoes[0].antes, Some(json!(null)));
    assert_eq!(alteracoes[0].depois, Some(json!(199.0)));
}

#[test]
fn test_diff_criacao_e_remocao() {
    // criação: sem instantâneo anterior, todos os campos aparecem como novos
    let depois = r#"{"nome": "Barbeiro Moderno", "preco": 300.0}"#;
    let alteracoes = diff_campos(None, Some(depois)).expect("Deve comparar");
    assert_eq!(alteracoes.len(), 2);
    assert!(alteracoes.iter().all(|a| a.antes.is_none()));

    // remoção: o espelho
    let antes = r#"{"nome": "Barbeiro Moderno", "preco": 300.0}"#;
    let alteracoes = diff_campos(Some(antes), None).expect("Deve comparar");
    assert_eq!(alteracoes.len(), 2);
    assert!(alteracoes.iter().all(|a| a.depois.is_none()));
}

#[test]
fn test_diff_ordem_alfabetica_das_chaves() {
    let antes = r#"{"zeta": 1, "alfa": 1}"#;
    let depois = r#"{"zeta": 2, "alfa": 2}"#;
    let alteracoes = diff_campos(Some(antes), Some(depois)).expect("Deve comparar");
    let campos: Vec<&str> = alteracoes.iter().map(|a| a.campo.as_str()).collect();
    assert_eq!(campos, vec!["alfa", "zeta"]);
}

#[test]
fn test_diff_instantaneo_invalido() {
    assert!(diff_campos(Some("{não é json"), Some("{}")).is_err());
}

#[test]
fn test_diff_valor_nao_objeto() {
    let alteracoes = diff_campos(Some("\"aprovado\""), Some("\"rejeitado\"")).expect("Deve comparar");
    assert_eq!(alteracoes.len(), 1);
    assert_eq!(alteracoes[0].campo, "_valor");
}
