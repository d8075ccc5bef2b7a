use serde::{Deserialize, Serialize};

use crate::models::TipoCurso;

pub mod handlers;

/// Corpo esperado pelo formulário público de lead.
///
/// # Estrutura do JSON:
/// ```json
/// {
///   "nome": "Maria Souza",
///   "email": "maria@example.com",
///   "telefone": "11 98888-0000",
///   "curso_interesse": "Cabeleireiro Profissional",
///   "mensagem": "Quero saber os horários da turma da noite"
/// }
/// ```
///
/// `curso_interesse` aceita o id numérico do curso ou o nome exato como
/// aparece no catálogo; a resolução para id acontece em
/// `resolver_curso_with_resolver`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeadInput {
    pub nome: String,
    pub email: String,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub curso_interesse: Option<String>,
    #[serde(default)]
    pub mensagem: Option<String>,
}

/// Lead pronto para persistir, com o curso de interesse já resolvido.
#[derive(Debug, Clone, Serialize)]
pub struct LeadResolvido {
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    pub curso_id: Option<i64>,
    pub mensagem: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursoInput {
    pub nome: String,
    pub descricao: String,
    pub tipo: TipoCurso,
    pub preco: f64,
    #[serde(default)]
    pub preco_promocional: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerInput {
    pub titulo: String,
    pub imagem: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub posicao: i64,
    #[serde(default = "ativo_padrao")]
    pub ativo: bool,
}

fn ativo_padrao() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepoimentoInput {
    pub nome: String,
    pub texto: String,
    pub nota: i64,
}

pub fn parse_lead_input(json_str: &str) -> Result<LeadInput, serde_json::Error> {
    serde_json::from_str::<LeadInput>(json_str)
}

pub fn parse_curso_input(json_str: &str) -> Result<CursoInput, serde_json::Error> {
    serde_json::from_str::<CursoInput>(json_str)
}

pub fn parse_banner_input(json_str: &str) -> Result<BannerInput, serde_json::Error> {
    serde_json::from_str::<BannerInput>(json_str)
}

pub fn parse_depoimento_input(json_str: &str) -> Result<DepoimentoInput, serde_json::Error> {
    serde_json::from_str::<DepoimentoInput>(json_str)
}

/// Validação mínima do formulário de lead. O limitador de envio fica no
/// banco hospedado; aqui só barramos o que nunca deveria entrar.
pub fn validar_lead(input: &LeadInput) -> Result<(), String> {
    if input.nome.trim().is_empty() {
        return Err("nome é obrigatório".to_string());
    }
    let email = input.email.trim();
    if email.is_empty() || !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(format!("email inválido: '{}'", input.email));
    }
    Ok(())
}

pub fn validar_curso(input: &CursoInput) -> Result<(), String> {
    if input.nome.trim().is_empty() {
        return Err("nome é obrigatório".to_string());
    }
    if !input.preco.is_finite() || input.preco < 0.0 {
        return Err(format!("preco inválido: {}", input.preco));
    }
    if let Some(promo) = input.preco_promocional {
        if !promo.is_finite() || promo < 0.0 {
            return Err(format!("preco_promocional inválido: {}", promo));
        }
    }
    Ok(())
}

pub fn validar_depoimento(input: &DepoimentoInput) -> Result<(), String> {
    if input.nome.trim().is_empty() {
        return Err("nome é obrigatório".to_string());
    }
    if input.texto.trim().is_empty() {
        return Err("texto é obrigatório".to_string());
    }
    if !(1..=5).contains(&input.nota) {
        return Err(format!("nota deve estar entre 1 e 5, veio {}", input.nota));
    }
    Ok(())
}

/// Resolve `curso_interesse` para o id do curso usando o banco principal.
pub fn resolver_curso(input: LeadInput) -> Result<LeadResolvido, Box<dyn std::error::Error>> {
    resolver_curso_with_resolver(input, |r| crate::storage::db::buscar_curso_id(r))
}

/// Versão parametrizável para testes: recebe um `resolver` que tenta mapear
/// o texto do formulário para um id de curso. Assim os testes não dependem
/// de um banco real.
///
/// Heurística: texto só com dígitos é tratado como id; qualquer outra coisa
/// vai para o resolver (busca por nome). Referência que não resolve vira
/// `None` em vez de erro: o lead vale mais do que o vínculo com o curso.
pub fn resolver_curso_with_resolver<F>(
    input: LeadInput,
    resolver: F,
) -> Result<LeadResolvido, Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Result<Option<i64>, Box<dyn std::error::Error>>,
{
    let curso_id = match input.curso_interesse.as_deref().map(str::trim) {
        Some(referencia) if !referencia.is_empty() => {
            if referencia.chars().all(|c| c.is_ascii_digit()) {
                referencia.parse::<i64>().ok()
            } else {
                match resolver(referencia) {
                    Ok(id) => id,
                    Err(_) => None,
                }
            }
        }
        _ => None,
    };

    Ok(LeadResolvido {
        nome: input.nome.trim().to_string(),
        email: input.email.trim().to_string(),
        telefone: input.telefone.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
        curso_id,
        mensagem: input.mensagem.filter(|m| !m.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

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
        assert_eq!(input.email, "maria@example.com");
        assert_eq!(input.curso_interesse.as_deref(), Some("Cabeleireiro Profissional"));
        assert!(validar_lead(&input).is_ok());
    }

    #[test]
    fn test_parse_lead_minimo() {
        // só nome e email (compatível com o formulário do rodapé)
        let json_data = r#"{"nome": "João", "email": "joao@example.com"}"#;
        let input = parse_lead_input(json_data).expect("Deve parsear lead mínimo");
        assert!(input.telefone.is_none());
        assert!(input.curso_interesse.is_none());
        assert!(validar_lead(&input).is_ok());
    }

    #[test]
    fn test_resolver_curso_com_mock() {
        let resolver = |referencia: &str| -> Result<Option<i64>, Box<dyn std::error::Error>> {
            if referencia.to_lowercase().contains("cabeleireiro") {
                return Ok(Some(7));
            }
            Ok(None)
        };

        let por_nome = LeadInput {
            nome: "Maria".to_string(),
            email: "maria@example.com".to_string(),
            telefone: None,
            curso_interesse: Some("Cabeleireiro Profissional".to_string()),
            mensagem: None,
        };
        let resolvido = resolver_curso_with_resolver(por_nome, resolver).unwrap();
        assert_eq!(resolvido.curso_id, Some(7));

        // id numérico não passa pelo resolver
        let por_id = LeadInput {
            nome: "Maria".to_string(),
            email: "maria@example.com".to_string(),
            telefone: None,
            curso_interesse: Some("42".to_string()),
            mensagem: None,
        };
        let resolvido = resolver_curso_with_resolver(por_id, resolver).unwrap();
        assert_eq!(resolvido.curso_id, Some(42));

        // nome desconhecido vira None, não erro
        let desconhecido = LeadInput {
            nome: "Maria".to_string(),
            email: "maria@example.com".to_string(),
            telefone: None,
            curso_interesse: Some("Curso que não existe".to_string()),
            mensagem: None,
        };
        let resolvido = resolver_curso_with_resolver(desconhecido, resolver).unwrap();
        assert_eq!(resolvido.curso_id, None);
    }

    #[test]
    fn test_validacoes() {
        let sem_nome = LeadInput {
            nome: "  ".to_string(),
            email: "a@b.com".to_string(),
            telefone: None,
            curso_interesse: None,
            mensagem: None,
        };
        assert!(validar_lead(&sem_nome).is_err());

        let email_ruim = LeadInput {
            nome: "Ana".to_string(),
            email: "sem-arroba".to_string(),
            telefone: None,
            curso_interesse: None,
            mensagem: None,
        };
        assert!(validar_lead(&email_ruim).is_err());

        let curso_preco_negativo = CursoInput {
            nome: "Manicure".to_string(),
            descricao: String::new(),
            tipo: TipoCurso::Presencial,
            preco: -1.0,
            preco_promocional: None,
        };
        assert!(validar_curso(&curso_preco_negativo).is_err());

        let nota_fora = DepoimentoInput {
            nome: "Ana".to_string(),
            texto: "Ótimo curso".to_string(),
            nota: 6,
        };
        assert!(validar_depoimento(&nota_fora).is_err());
    }
}
