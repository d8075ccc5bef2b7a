//! Estado efêmero da vista do catálogo e seu redutor puro.
//!
//! O estado é um valor imutável e cada interação passa por `reduzir`, então
//! as regras de navegação são testáveis sem nenhum arnês de UI.

use crate::models::Curso;

use super::filtros::{lista_visivel, FiltroTipo};
use super::paginacao::{paginar, Pagina, ITENS_POR_PAGINA};

/// Estado criado na montagem da vista com os padrões (todos os tipos, busca
/// vazia, página 1). Só as ações abaixo o alteram; nada mais escreve nele.
#[derive(Debug, Clone, PartialEq)]
pub struct EstadoCatalogo {
    pub filtro_tipo: FiltroTipo,
    pub termo_busca: String,
    pub pagina_atual: usize,
}

impl Default for EstadoCatalogo {
    fn default() -> Self {
        EstadoCatalogo {
            filtro_tipo: FiltroTipo::Todos,
            termo_busca: String::new(),
            pagina_atual: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AcaoCatalogo {
    DefinirFiltroTipo(FiltroTipo),
    DefinirBusca(String),
    IrParaPagina(usize),
}

/// Efeito de apresentação sinalizado pelo redutor. A rolagem volta ao topo
/// da página, não ao topo da lista.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Efeito {
    Nenhum,
    RolarParaTopo,
}

/// Redutor puro da vista. Mudar filtro ou busca reinicia a página para 1
/// incondicionalmente. `IrParaPagina` fora de [1, total_paginas] é rejeitado
/// em silêncio; quando aceito, sinaliza a rolagem para o topo.
pub fn reduzir(
    estado: &EstadoCatalogo,
    acao: AcaoCatalogo,
    total_paginas: usize,
) -> (EstadoCatalogo, Efeito) {
    match acao {
        AcaoCatalogo::DefinirFiltroTipo(filtro) => (
            EstadoCatalogo {
                filtro_tipo: filtro,
                termo_busca: estado.termo_busca.clone(),
                pagina_atual: 1,
            },
            Efeito::Nenhum,
        ),
        AcaoCatalogo::DefinirBusca(termo) => (
            EstadoCatalogo {
                filtro_tipo: estado.filtro_tipo,
                termo_busca: termo,
                pagina_atual: 1,
            },
            Efeito::Nenhum,
        ),
        AcaoCatalogo::IrParaPagina(pagina) => {
            if pagina < 1 || pagina > total_paginas {
                (estado.clone(), Efeito::Nenhum)
            } else {
                (
                    EstadoCatalogo {
                        pagina_atual: pagina,
                        ..estado.clone()
                    },
                    Efeito::RolarParaTopo,
                )
            }
        }
    }
}

/// Projeta a página visível a partir da coleção bruta e do estado atual.
/// Se a coleção encolheu fora de uma mudança de filtro/busca (edição pelo
/// painel enquanto o visitante estava numa página alta), a página efetiva é
/// limitada a `total_paginas` na renderização; o estado guardado não muda.
pub fn projetar(cursos: &[Curso], estado: &EstadoCatalogo) -> Pagina {
    let visiveis = lista_visivel(cursos, estado.filtro_tipo, &estado.termo_busca);
    let total_paginas = visiveis.len().div_ceil(ITENS_POR_PAGINA);
    let pagina_efetiva = if total_paginas == 0 {
        1
    } else {
        estado.pagina_atual.clamp(1, total_paginas)
    };
    paginar(&visiveis, pagina_efetiva, ITENS_POR_PAGINA)
}
