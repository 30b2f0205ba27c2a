//! Data layer: the `Tarefa` row type and its companion structs.

pub mod tarefa;

pub use tarefa::{NewTarefa, Tarefa, TarefaUpdate};
