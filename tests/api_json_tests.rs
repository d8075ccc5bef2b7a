use vitrine::api_json::*;
use vitrine::models::TipoCurso;

#[test]
fn test_parse_lead_completo() {
    let json_data = r#"
    {
        "nome": "Maria Souza",
        "email": "maria@example.com",
        "telefone": "11 98888-0000",
        "curso_interesse": "Cabeleireiro Profissional",
        "mensagem": "Turma da noite ainda tem vaga?"
    }
    "#;

    let input = parse_lead_input(json_data).expect("Deve parsear lead completo");
    assert_eq!(input.nome, "Maria Souza");
    assert_eq!(input.curso_interesse.as_deref(), Some("Cabeleireiro Profissional"));
    assert!(validar_lead(&input).is_ok());
}

#[test]
fn test_parse_lead_sem_campos_opcionais() {
    let json_data = r#"{"nome": "João", "email": "joao@example.com"}"#;
    let input = parse_lead_input(json_data).expect("Deve parsear lead mínimo");
    assert!(input.telefone.is_none());
    assert!(input.curso_interesse.is_none());
    assert!(input.mensagem.is_none());
}

#[test]
fn test_resolver_curso_com_mock() {
    let resolver = |referencia: &str| -> Result<Option<i64>, Box<dyn std::error::Error>> {
        match referencia.to_lowercase().as_str() {
            "cabeleireiro profissional" => Ok(Some(7)),
            "manicure e pedicure" => Ok(Some(2)),
            _ => Ok(None),
        }
    };

    let entrada = |curso: &str| LeadInput {
        nome: "Maria".to_string(),
        email: "maria@example.com".to_string(),
        telefone: Some("  11 98888-0000  ".to_string()),
        curso_interesse: Some(curso.to_string()),
        mensagem: None,
    };

    // nome conhecido resolve para o id
    let r = resolver_curso_with_resolver(entrada("Cabeleireiro Profissional"), resolver).unwrap();
    assert_eq!(r.curso_id, Some(7));
    // telefone sai aparado
    assert_eq!(r.telefone.as_deref(), Some("11 98888-0000"));

    // id numérico é usado direto, sem consultar o resolver
    let r = resolver_curso_with_resolver(entrada("42"), resolver).unwrap();
    assert_eq!(r.curso_id, Some(42));

    // referência desconhecida não derruba o lead
    let r = resolver_curso_with_resolver(entrada("Aromaterapia"), resolver).unwrap();
    assert_eq!(r.curso_id, None);
}

#[test]
fn test_validar_curso() {
    let base = CursoInput {
        nome: "Manicure e Pedicure".to_string(),
        descricao: "Curso completo".to_string(),
        tipo: TipoCurso::Presencial,
        preco: 250.0,
        preco_promocional: Some(199.0),
    };
    assert!(validar_curso(&base).is_ok());

    let preco_negativo = CursoInput { preco: -10.0, ..base.clone() };
    assert!(validar_curso(&preco_negativo).is_err());

    let promo_nan = CursoInput { preco_promocional: Some(f64::NAN), ..base.clone() };
    assert!(validar_curso(&promo_nan).is_err());

    let sem_nome = CursoInput { nome: " ".to_string(), ..base };
    assert!(validar_curso(&sem_nome).is_err());
}

#[test]
fn test_parse_curso_input_tipo() {
    let json_data = r#"
    {
        "nome": "Marketing Digital",
        "descricao": "Redes sociais para pequenos negócios",
        "tipo": "ead",
        "preco": 180.0
    }
    "#;
    let input = parse_curso_input(json_data).expect("Deve parsear curso");
    assert_eq!(input.tipo, TipoCurso::Ead);
    assert!(input.preco_promocional.is_none());

    // modalidade desconhecida é rejeitada no parse
    let invalido = r#"{"nome": "X", "descricao": "", "tipo": "hibrido", "preco": 1.0}"#;
    assert!(parse_curso_input(invalido).is_err());
}

#[test]
fn test_validar_depoimento_nota() {
    let base = DepoimentoInput {
        nome: "Ana".to_string(),
        texto: "Mudou minha carreira".to_string(),
        nota: 5,
    };
    assert!(validar_depoimento(&base).is_ok());

    for nota in [0, 6, -1] {
        let fora = DepoimentoInput { nota, ..base.clone() };
        assert!(validar_depoimento(&fora).is_err(), "nota {} deveria falhar", nota);
    }
}
