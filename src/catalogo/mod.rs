// Núcleo do catálogo: a projeção filtrada, ordenada e paginada da coleção
// de cursos que o site mostra ao visitante. Tudo aqui é síncrono e puro;
// a busca dos dados fica com `storage` e a apresentação com os handlers.

pub mod estado;
pub mod filtros;
pub mod paginacao;

pub use estado::{projetar, reduzir, AcaoCatalogo, Efeito, EstadoCatalogo};
pub use filtros::{em_promocao, lista_visivel, FiltroTipo};
pub use paginacao::{paginar, Pagina, ITENS_POR_PAGINA};
