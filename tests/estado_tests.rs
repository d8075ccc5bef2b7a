use vitrine::catalogo::{
    projetar, reduzir, AcaoCatalogo, Efeito, EstadoCatalogo, FiltroTipo, ITENS_POR_PAGINA,
};
use vitrine::models::{Curso, TipoCurso};

fn cursos(n: usize) -> Vec<Curso> {
    (1..=n as i64)
        .map(|id| Curso {
            id,
            nome: format!("Curso {}", id),
            descricao: String::new(),
            tipo: TipoCurso::Presencial,
            preco: 100.0,
            preco_promocional: None,
        })
        .collect()
}

#[test]
fn test_estado_inicial() {
    let estado = EstadoCatalogo::default();
    assert_eq!(estado.filtro_tipo, FiltroTipo::Todos);
    assert_eq!(estado.termo_busca, "");
    assert_eq!(estado.pagina_atual, 1);
}

#[test]
fn test_mudar_filtro_ou_busca_reinicia_pagina() {
    // qualquer mudança de filtro ou busca volta para a página 1
    let na_pagina_3 = EstadoCatalogo {
        filtro_tipo: FiltroTipo::Todos,
        termo_busca: String::new(),
        pagina_atual: 3,
    };

    let (depois_filtro, efeito) = reduzir(
        &na_pagina_3,
        AcaoCatalogo::DefinirFiltroTipo(FiltroTipo::Ead),
        5,
    );
    assert_eq!(depois_filtro.pagina_atual, 1);
    assert_eq!(depois_filtro.filtro_tipo, FiltroTipo::Ead);
    assert_eq!(efeito, Efeito::Nenhum);

    let (depois_busca, _) = reduzir(
        &na_pagina_3,
        AcaoCatalogo::DefinirBusca("manicure".to_string()),
        5,
    );
    assert_eq!(depois_busca.pagina_atual, 1);
    assert_eq!(depois_busca.termo_busca, "manicure");
}

#[test]
fn test_navegacao_valida_rola_para_o_topo() {
    let estado = EstadoCatalogo::default();
    let (novo, efeito) = reduzir(&estado, AcaoCatalogo::IrParaPagina(2), 3);
    assert_eq!(novo.pagina_atual, 2);
    assert_eq!(efeito, Efeito::RolarParaTopo);
}

#[test]
fn test_navegacao_fora_do_intervalo_e_ignorada() {
    // 25 cursos dão 2 páginas; ir para a 3 não muda nada
    let lista = cursos(25);
    let estado = EstadoCatalogo {
        filtro_tipo: FiltroTipo::Todos,
        termo_busca: String::new(),
        pagina_atual: 2,
    };

    let pagina1 = projetar(&lista, &EstadoCatalogo::default());
    assert_eq!(pagina1.total_paginas, 2);
    assert_eq!(pagina1.itens.len(), ITENS_POR_PAGINA);

    let pagina2 = projetar(&lista, &estado);
    assert_eq!(pagina2.itens.len(), 5);

    let (novo, efeito) = reduzir(&estado, AcaoCatalogo::IrParaPagina(3), pagina2.total_paginas);
    assert_eq!(novo, estado, "Página inválida deve ser rejeitada em silêncio");
    assert_eq!(efeito, Efeito::Nenhum);

    let (novo, _) = reduzir(&estado, AcaoCatalogo::IrParaPagina(0), pagina2.total_paginas);
    assert_eq!(novo, estado);
}

#[test]
fn test_projetar_limita_pagina_quando_dados_encolhem() {
    // o visitante estava na página 2 e o painel removeu cursos: a projeção
    // limita a página efetiva sem mexer no estado guardado
    let estado = EstadoCatalogo {
        filtro_tipo: FiltroTipo::Todos,
        termo_busca: String::new(),
        pagina_atual: 2,
    };

    let encolhido = cursos(10); // agora só uma página
    let pagina = projetar(&encolhido, &estado);
    assert_eq!(pagina.pagina_atual, 1);
    assert_eq!(pagina.itens.len(), 10);
    assert_eq!(estado.pagina_atual, 2);
}

#[test]
fn test_projetar_catalogo_vazio() {
    let pagina = projetar(&[], &EstadoCatalogo::default());
    assert_eq!(pagina.total_paginas, 0);
    assert_eq!(pagina.total_itens, 0);
    assert!(pagina.itens.is_empty());
    assert!(!pagina.exibir_paginacao);
}

#[test]
fn test_projetar_aplica_filtro_busca_e_ordenacao() {
    let mut lista = cursos(6);
    lista[4].preco_promocional = Some(50.0); // id 5 em promoção

    let estado = EstadoCatalogo::default();
    let pagina = projetar(&lista, &estado);
    let ids: Vec<i64> = pagina.itens.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![5, 1, 2, 3, 4, 6]);
}
