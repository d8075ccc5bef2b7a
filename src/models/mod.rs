// Estruturas de dados principais

use serde::{Deserialize, Serialize};

/// Modalidade do curso. Os valores na API e no banco são sempre minúsculos
/// ("presencial" / "ead"), igual ao formulário do site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoCurso {
    Presencial,
    Ead,
}

impl TipoCurso {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoCurso::Presencial => "presencial",
            TipoCurso::Ead => "ead",
        }
    }

    pub fn parse(s: &str) -> Option<TipoCurso> {
        match s.trim().to_lowercase().as_str() {
            "presencial" => Some(TipoCurso::Presencial),
            "ead" => Some(TipoCurso::Ead),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curso {
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    pub tipo: TipoCurso,
    /// Preço base. Nunca negativo em dados válidos.
    pub preco: f64,
    /// Preço promocional opcional. A condição de promoção é derivada em
    /// `catalogo::em_promocao` a cada avaliação, nunca armazenada: os preços
    /// mudam pelo painel administrativo entre uma renderização e outra.
    pub preco_promocional: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub id: i64,
    pub titulo: String,
    /// Nome do arquivo salvo em `uploads/banners` (a entrega via CDN fica
    /// fora desta API).
    pub imagem: String,
    pub link: Option<String>,
    /// Ordem no carrossel, do menor para o maior.
    pub posicao: i64,
    pub ativo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    /// Id do curso de interesse, quando o formulário conseguiu resolver.
    pub curso_interesse: Option<i64>,
    pub mensagem: Option<String>,
    pub ts: String,
}

/// Estado de moderação de um depoimento. Submissões públicas entram como
/// `pendente`; só `aprovado` aparece no site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusDepoimento {
    Pendente,
    Aprovado,
    Rejeitado,
}

impl StatusDepoimento {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusDepoimento::Pendente => "pendente",
            StatusDepoimento::Aprovado => "aprovado",
            StatusDepoimento::Rejeitado => "rejeitado",
        }
    }

    pub fn parse(s: &str) -> Option<StatusDepoimento> {
        match s.trim().to_lowercase().as_str() {
            "pendente" => Some(StatusDepoimento::Pendente),
            "aprovado" => Some(StatusDepoimento::Aprovado),
            "rejeitado" => Some(StatusDepoimento::Rejeitado),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Depoimento {
    pub id: i64,
    pub nome: String,
    pub texto: String,
    /// Nota de 1 a 5.
    pub nota: i64,
    pub status: StatusDepoimento,
    pub ts: String,
}

/// Evento do log de auditoria. `dados_antes`/`dados_depois` guardam o
/// instantâneo JSON da entidade para o visualizador de diferenças.
#[derive(Debug, Clone, Serialize)]
pub struct EventoAuditoria {
    pub id: i64,
    pub ts: String,
    pub autor: Option<String>,
    pub entidade: String,
    pub entidade_id: i64,
    pub acao: String,
    pub dados_antes: Option<String>,
    pub dados_depois: Option<String>,
}
