use crate::*;

#[derive(Debug, Clone)]
pub struct Fields {
    pub all: Vec<Field>,
    container_name: String,
}

impl Fields {
    pub(crate) fn new(all: Vec<Field>, container_name: String) -> Fields {
        Fields { all, container_name }
    }

    pub fn scalar(&self) -> Vec<ScalarFieldRef> {
        self.all.iter().filter_map(|f| f.clone().into_scalar()).collect()
    }

    pub fn composite(&self) -> Vec<CompositeFieldRef> {
        self.all.iter().filter_map(|f| f.clone().into_composite()).collect()
    }

    pub fn id(&self) -> Option<ScalarFieldRef> {
        self.scalar().into_iter().find(|sf| sf.is_id())
    }

    pub fn find_from_all(&self, prisma_name: &str) -> crate::Result<&Field> {
        self.all
            .iter()
            .find(|field| field.name() == prisma_name)
            .ok_or_else(|| DomainError::FieldNotFound {
                name: prisma_name.to_string(),
                container_name: self.container_name.clone(),
                container_type: "model",
            })
    }

    pub fn find_from_scalar(&self, name: &str) -> crate::Result<ScalarFieldRef> {
        self.scalar()
            .into_iter()
            .find(|field| field.name == name)
            .ok_or_else(|| DomainError::FieldNotFound {
                name: name.to_string(),
                container_name: self.container_name.clone(),
                container_type: "model",
            })
    }

    pub fn find_from_composite(&self, name: &str) -> crate::Result<CompositeFieldRef> {
        self.composite()
            .into_iter()
            .find(|field| field.name == name)
            .ok_or_else(|| DomainError::FieldNotFound {
                name: name.to_string(),
                container_name: self.container_name.clone(),
                container_type: "model",
            })
    }
}
