//! Filtros e ordenação da lista visível do catálogo.
//!
//! A ordem das etapas é fixa: filtro de modalidade, depois busca por
//! substring, depois partição estável com os cursos em promoção primeiro.

use crate::models::{Curso, TipoCurso};

/// Filtro de modalidade escolhido pelo visitante. `Todos` é o padrão na
/// montagem da vista.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiltroTipo {
    Todos,
    Presencial,
    Ead,
}

impl FiltroTipo {
    /// Valores aceitos na query string: "all", "presencial", "ead".
    pub fn parse(s: &str) -> Option<FiltroTipo> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(FiltroTipo::Todos),
            "presencial" => Some(FiltroTipo::Presencial),
            "ead" => Some(FiltroTipo::Ead),
            _ => None,
        }
    }
}

/// Um curso está em promoção se o preço promocional existe, é maior que
/// zero e estritamente menor que o preço base. Valores malformados
/// (negativos, NaN) falham na comparação e o curso fica como não promovido;
/// nunca é um erro.
pub fn em_promocao(curso: &Curso) -> bool {
    match curso.preco_promocional {
        Some(promo) => promo > 0.0 && promo < curso.preco,
        None => false,
    }
}

fn passa_tipo(curso: &Curso, filtro: FiltroTipo) -> bool {
    match filtro {
        FiltroTipo::Todos => true,
        FiltroTipo::Presencial => curso.tipo == TipoCurso::Presencial,
        FiltroTipo::Ead => curso.tipo == TipoCurso::Ead,
    }
}

// Busca por substring pura contra nome e descrição minúsculos. Sem
// tokenização, sem fuzzy, sem normalização de acentos.
fn passa_busca(curso: &Curso, termo_minusculo: &str) -> bool {
    curso.nome.to_lowercase().contains(termo_minusculo)
        || curso.descricao.to_lowercase().contains(termo_minusculo)
}

/// Projeta a lista visível: filtro de modalidade, busca e ordenação com
/// promoções primeiro. Busca vazia (ou só espaços) mantém a lista toda.
/// A entrada nunca é modificada; dentro de cada grupo a ordem relativa
/// original é preservada (o comparador devolve `Equal` para pares com o
/// mesmo status de promoção e o sort da std é estável).
pub fn lista_visivel(cursos: &[Curso], filtro: FiltroTipo, busca: &str) -> Vec<Curso> {
    let termo = busca.trim().to_lowercase();
    let mut visiveis: Vec<Curso> = cursos
        .iter()
        .filter(|c| passa_tipo(c, filtro))
        .filter(|c| termo.is_empty() || passa_busca(c, &termo))
        .cloned()
        .collect();

    visiveis.sort_by(|a, b| em_promocao(b).cmp(&em_promocao(a)));
    visiveis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curso(id: i64, preco: f64, promo: Option<f64>) -> Curso {
        Curso {
            id,
            nome: format!("Curso {}", id),
            descricao: String::new(),
            tipo: TipoCurso::Presencial,
            preco,
            preco_promocional: promo,
        }
    }

    #[test]
    fn test_em_promocao() {
        assert!(em_promocao(&curso(1, 100.0, Some(50.0))));
        // promo zero, ausente ou >= preço não conta como promoção
        assert!(!em_promocao(&curso(2, 100.0, Some(0.0))));
        assert!(!em_promocao(&curso(3, 100.0, None)));
        assert!(!em_promocao(&curso(4, 100.0, Some(100.0))));
        assert!(!em_promocao(&curso(5, 100.0, Some(150.0))));
        // dados malformados degradam para "sem promoção"
        assert!(!em_promocao(&curso(6, 100.0, Some(f64::NAN))));
        assert!(!em_promocao(&curso(7, f64::NAN, Some(50.0))));
        assert!(!em_promocao(&curso(8, 100.0, Some(-10.0))));
    }

    #[test]
    fn test_ordenacao_estavel_promocoes_primeiro() {
        let entrada = vec![
            curso(1, 100.0, None),
            curso(2, 100.0, Some(80.0)),
            curso(3, 100.0, None),
            curso(4, 100.0, Some(60.0)),
        ];
        let saida = lista_visivel(&entrada, FiltroTipo::Todos, "");
        let ids: Vec<i64> = saida.iter().map(|c| c.id).collect();
        // promovidos na ordem original, depois os demais na ordem original
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }
}
