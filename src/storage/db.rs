use rusqlite::{params, Connection};
use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::api_json::{BannerInput, CursoInput, DepoimentoInput, LeadResolvido};
use crate::models::{Banner, Curso, Depoimento, Lead, StatusDepoimento, TipoCurso};

// carrega .env antes de qualquer leitura de ambiente
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Caminho do banco principal. Honra VITRINE_DB_PATH / VITRINE_DB_URL
/// (aceitando os esquemas sqlite:// e file://); sem configuração usa
/// `data/vitrine.db`.
pub fn db_path() -> PathBuf {
    load_dotenv();
    if let Ok(p) = env::var("VITRINE_DB_PATH") {
        PathBuf::from(p)
    } else if let Ok(p) = env::var("VITRINE_DB_URL") {
        if p.starts_with("sqlite://") {
            PathBuf::from(p.trim_start_matches("sqlite://"))
        } else if p.starts_with("file://") {
            PathBuf::from(p.trim_start_matches("file://"))
        } else {
            PathBuf::from("data/vitrine.db")
        }
    } else {
        PathBuf::from("data/vitrine.db")
    }
}

fn abrir() -> Result<Connection, Box<dyn Error>> {
    let conn = Connection::open(db_path())?;
    Ok(conn)
}

/// Cria o diretório e as tabelas do banco principal se ainda não existem.
pub fn init_db() -> Result<(), Box<dyn Error>> {
    let path = db_path();
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    let conn = Connection::open(path)?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS cursos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            descricao TEXT NOT NULL,
            tipo TEXT NOT NULL,
            preco REAL NOT NULL,
            preco_promocional REAL
        )",
        [],
    )?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS banners (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            titulo TEXT NOT NULL,
            imagem TEXT NOT NULL,
            link TEXT,
            posicao INTEGER NOT NULL DEFAULT 0,
            ativo INTEGER NOT NULL DEFAULT 1
        )",
        [],
    )?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS leads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ts TEXT NOT NULL,
            nome TEXT NOT NULL,
            email TEXT NOT NULL,
            telefone TEXT,
            curso_interesse INTEGER,
            mensagem TEXT
        )",
        [],
    )?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS depoimentos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ts TEXT NOT NULL,
            nome TEXT NOT NULL,
            texto TEXT NOT NULL,
            nota INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'pendente'
        )",
        [],
    )?;
    Ok(())
}

fn row_para_curso(row: &rusqlite::Row<'_>) -> rusqlite::Result<Curso> {
    let tipo_raw: String = row.get(3)?;
    Ok(Curso {
        id: row.get(0)?,
        nome: row.get(1)?,
        descricao: row.get(2)?,
        // linhas antigas com modalidade desconhecida caem em presencial
        tipo: TipoCurso::parse(&tipo_raw).unwrap_or(TipoCurso::Presencial),
        preco: row.get(4)?,
        preco_promocional: row.get(5)?,
    })
}

/// Coleção completa de cursos, na ordem de inserção. É o colaborador de
/// busca da vista do catálogo: a projeção em si acontece em `crate::catalogo`.
pub fn listar_cursos() -> Result<Vec<Curso>, Box<dyn Error>> {
    let conn = abrir()?;
    let mut stmt = conn.prepare(
        "SELECT id, nome, descricao, tipo, preco, preco_promocional FROM cursos ORDER BY id",
    )?;
    let rows = stmt.query_map([], row_para_curso)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn obter_curso(id: i64) -> Result<Option<Curso>, Box<dyn Error>> {
    let conn = abrir()?;
    let mut stmt = conn.prepare(
        "SELECT id, nome, descricao, tipo, preco, preco_promocional FROM cursos WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map(params![id], row_para_curso)?;
    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

/// Resolve a referência de curso vinda do formulário de lead: um id numérico
/// ou o nome exato (sem diferenciar maiúsculas).
pub fn buscar_curso_id(referencia: &str) -> Result<Option<i64>, Box<dyn Error>> {
    let conn = abrir()?;
    let mut stmt = conn.prepare("SELECT id FROM cursos WHERE lower(nome) = lower(?1) LIMIT 1")?;
    let mut rows = stmt.query_map(params![referencia.trim()], |row| row.get::<_, i64>(0))?;
    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

pub fn inserir_curso(input: &CursoInput) -> Result<i64, Box<dyn Error>> {
    let conn = abrir()?;
    conn.execute(
        "INSERT INTO cursos (nome, descricao, tipo, preco, preco_promocional)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            input.nome,
            input.descricao,
            input.tipo.as_str(),
            input.preco,
            input.preco_promocional,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn atualizar_curso(id: i64, input: &CursoInput) -> Result<bool, Box<dyn Error>> {
    let conn = abrir()?;
    let alteradas = conn.execute(
        "UPDATE cursos SET nome = ?1, descricao = ?2, tipo = ?3, preco = ?4,
         preco_promocional = ?5 WHERE id = ?6",
        params![
            input.nome,
            input.descricao,
            input.tipo.as_str(),
            input.preco,
            input.preco_promocional,
            id,
        ],
    )?;
    Ok(alteradas > 0)
}

pub fn remover_curso(id: i64) -> Result<bool, Box<dyn Error>> {
    let conn = abrir()?;
    let alteradas = conn.execute("DELETE FROM cursos WHERE id = ?1", params![id])?;
    Ok(alteradas > 0)
}

fn row_para_banner(row: &rusqlite::Row<'_>) -> rusqlite::Result<Banner> {
    let ativo: i64 = row.get(5)?;
    Ok(Banner {
        id: row.get(0)?,
        titulo: row.get(1)?,
        imagem: row.get(2)?,
        link: row.get(3)?,
        posicao: row.get(4)?,
        ativo: ativo != 0,
    })
}

/// Banners para o carrossel. Com `somente_ativos`, devolve apenas os ativos;
/// a ordem é sempre posição e depois id, para empates ficarem estáveis.
pub fn listar_banners(somente_ativos: bool) -> Result<Vec<Banner>, Box<dyn Error>> {
    let conn = abrir()?;
    let sql = if somente_ativos {
        "SELECT id, titulo, imagem, link, posicao, ativo FROM banners
         WHERE ativo = 1 ORDER BY posicao, id"
    } else {
        "SELECT id, titulo, imagem, link, posicao, ativo FROM banners ORDER BY posicao, id"
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], row_para_banner)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn obter_banner(id: i64) -> Result<Option<Banner>, Box<dyn Error>> {
    let conn = abrir()?;
    let mut stmt =
        conn.prepare("SELECT id, titulo, imagem, link, posicao, ativo FROM banners WHERE id = ?1")?;
    let mut rows = stmt.query_map(params![id], row_para_banner)?;
    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

pub fn inserir_banner(input: &BannerInput) -> Result<i64, Box<dyn Error>> {
    let conn = abrir()?;
    conn.execute(
        "INSERT INTO banners (titulo, imagem, link, posicao, ativo) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            input.titulo,
            input.imagem,
            input.link,
            input.posicao,
            input.ativo as i64,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn atualizar_banner(id: i64, input: &BannerInput) -> Result<bool, Box<dyn Error>> {
    let conn = abrir()?;
    let alteradas = conn.execute(
        "UPDATE banners SET titulo = ?1, imagem = ?2, link = ?3, posicao = ?4, ativo = ?5
         WHERE id = ?6",
        params![
            input.titulo,
            input.imagem,
            input.link,
            input.posicao,
            input.ativo as i64,
            id,
        ],
    )?;
    Ok(alteradas > 0)
}

pub fn remover_banner(id: i64) -> Result<bool, Box<dyn Error>> {
    let conn = abrir()?;
    let alteradas = conn.execute("DELETE FROM banners WHERE id = ?1", params![id])?;
    Ok(alteradas > 0)
}

pub fn inserir_lead(lead: &LeadResolvido) -> Result<i64, Box<dyn Error>> {
    let conn = abrir()?;
    let ts = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO leads (ts, nome, email, telefone, curso_interesse, mensagem)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            ts,
            lead.nome,
            lead.email,
            lead.telefone,
            lead.curso_id,
            lead.mensagem,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_para_lead(row: &rusqlite::Row<'_>) -> rusqlite::Result<Lead> {
    Ok(Lead {
        id: row.get(0)?,
        ts: row.get(1)?,
        nome: row.get(2)?,
        email: row.get(3)?,
        telefone: row.get(4)?,
        curso_interesse: row.get(5)?,
        mensagem: row.get(6)?,
    })
}

/// Caixa de entrada de leads, do mais recente para o mais antigo. Os filtros
/// opcionais (curso de interesse e data mínima em RFC 3339) são aplicados
/// sobre as linhas carregadas; o volume aqui é de dezenas por dia.
pub fn listar_leads(
    curso: Option<i64>,
    desde: Option<&str>,
    limite: usize,
) -> Result<Vec<Lead>, Box<dyn Error>> {
    let conn = abrir()?;
    let mut stmt = conn.prepare(
        "SELECT id, ts, nome, email, telefone, curso_interesse, mensagem
         FROM leads ORDER BY id DESC",
    )?;
    let rows = stmt.query_map([], row_para_lead)?;

    let desde_dt: Option<DateTime<Utc>> = match desde {
        Some(s) => match s.parse::<DateTime<Utc>>() {
            Ok(dt) => Some(dt),
            Err(e) => return Err(format!("data 'desde' inválida '{}': {}", s, e).into()),
        },
        None => None,
    };

    let mut out = Vec::new();
    for r in rows {
        let lead = r?;
        if let Some(cid) = curso {
            if lead.curso_interesse != Some(cid) {
                continue;
            }
        }
        if let Some(min) = desde_dt {
            match lead.ts.parse::<DateTime<Utc>>() {
                Ok(dt) if dt >= min => {}
                _ => continue,
            }
        }
        out.push(lead);
        if out.len() >= limite {
            break;
        }
    }
    Ok(out)
}

fn row_para_depoimento(row: &rusqlite::Row<'_>) -> rusqlite::Result<Depoimento> {
    let status_raw: String = row.get(5)?;
    Ok(Depoimento {
        id: row.get(0)?,
        ts: row.get(1)?,
        nome: row.get(2)?,
        texto: row.get(3)?,
        nota: row.get(4)?,
        status: StatusDepoimento::parse(&status_raw).unwrap_or(StatusDepoimento::Pendente),
    })
}

pub fn inserir_depoimento(input: &DepoimentoInput) -> Result<i64, Box<dyn Error>> {
    let conn = abrir()?;
    let ts = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO depoimentos (ts, nome, texto, nota, status) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ts,
            input.nome,
            input.texto,
            input.nota,
            StatusDepoimento::Pendente.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn listar_depoimentos(
    status: Option<StatusDepoimento>,
) -> Result<Vec<Depoimento>, Box<dyn Error>> {
    let conn = abrir()?;
    let mut stmt = conn.prepare(
        "SELECT id, ts, nome, texto, nota, status FROM depoimentos ORDER BY id DESC",
    )?;
    let rows = stmt.query_map([], row_para_depoimento)?;
    let mut out = Vec::new();
    for r in rows {
        let dep = r?;
        if let Some(s) = status {
            if dep.status != s {
                continue;
            }
        }
        out.push(dep);
    }
    Ok(out)
}

pub fn obter_depoimento(id: i64) -> Result<Option<Depoimento>, Box<dyn Error>> {
    let conn = abrir()?;
    let mut stmt = conn
        .prepare("SELECT id, ts, nome, texto, nota, status FROM depoimentos WHERE id = ?1")?;
    let mut rows = stmt.query_map(params![id], row_para_depoimento)?;
    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

pub fn atualizar_status_depoimento(
    id: i64,
    status: StatusDepoimento,
) -> Result<bool, Box<dyn Error>> {
    let conn = abrir()?;
    let alteradas = conn.execute(
        "UPDATE depoimentos SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(alteradas > 0)
}
