//! Recorte em páginas da lista ordenada do catálogo.

use crate::models::Curso;

/// Grade de 4 colunas x 5 linhas no layout de referência. Mudar o layout só
/// exige ajustar esta constante; a aritmética abaixo não usa literais.
pub const ITENS_POR_PAGINA: usize = 20;

/// Página projetada para a apresentação.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Pagina {
    pub itens: Vec<Curso>,
    pub pagina_atual: usize,
    pub total_paginas: usize,
    pub total_itens: usize,
    /// Os controles de paginação só aparecem com mais de uma página.
    pub exibir_paginacao: bool,
}

/// Recorta a página pedida da lista já ordenada. `pagina` é 1-based; uma
/// página fora do intervalo produz um recorte vazio, nunca um erro (a
/// navegação válida é responsabilidade do redutor em `estado`).
pub fn paginar(lista: &[Curso], pagina: usize, itens_por_pagina: usize) -> Pagina {
    let total_itens = lista.len();
    let total_paginas = if itens_por_pagina == 0 {
        0
    } else {
        total_itens.div_ceil(itens_por_pagina)
    };

    let inicio = pagina.saturating_sub(1).saturating_mul(itens_por_pagina);
    let itens: Vec<Curso> = lista.iter().skip(inicio).take(itens_por_pagina).cloned().collect();

    Pagina {
        itens,
        pagina_atual: pagina,
        total_paginas,
        total_itens,
        exibir_paginacao: total_paginas > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TipoCurso;

    fn cursos(n: usize) -> Vec<Curso> {
        (1..=n as i64)
            .map(|id| Curso {
                id,
                nome: format!("Curso {}", id),
                descricao: String::new(),
                tipo: TipoCurso::Ead,
                preco: 100.0,
                preco_promocional: None,
            })
            .collect()
    }

    #[test]
    fn test_total_paginas() {
        assert_eq!(paginar(&cursos(0), 1, 20).total_paginas, 0);
        assert_eq!(paginar(&cursos(19), 1, 20).total_paginas, 1);
        assert_eq!(paginar(&cursos(20), 1, 20).total_paginas, 1);
        assert_eq!(paginar(&cursos(21), 1, 20).total_paginas, 2);
    }

    #[test]
    fn test_exibir_paginacao_so_com_mais_de_uma_pagina() {
        assert!(!paginar(&cursos(0), 1, 20).exibir_paginacao);
        assert!(!paginar(&cursos(20), 1, 20).exibir_paginacao);
        assert!(paginar(&cursos(21), 1, 20).exibir_paginacao);
    }

    #[test]
    fn test_pagina_fora_do_intervalo_fica_vazia() {
        let p = paginar(&cursos(5), 7, 20);
        assert!(p.itens.is_empty());
        assert_eq!(p.total_itens, 5);
    }
}
